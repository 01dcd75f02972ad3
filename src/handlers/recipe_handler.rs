use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::request::RecipeRequest};

#[post("/recipes/generate")]
async fn generate_recipe(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RecipeRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let recipe = state
        .recipe_service
        .generate_recipe(&request.student_id, &request.similar_recipes)
        .await?;
    Ok(HttpResponse::Ok().json(recipe))
}
