use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{CatalogRequest, Step1QuestionsRequest, Step1SubmitRequest},
};

#[post("/cvp_lite/step1")]
async fn step1_questions(
    state: web::Data<Arc<AppState>>,
    request: web::Json<Step1QuestionsRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let response = state
        .assessment_service
        .generate_step1_questions(&request.student_id)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/cvp_lite/step1/submit")]
async fn step1_submit(
    state: web::Data<Arc<AppState>>,
    request: web::Json<Step1SubmitRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let response = state
        .assessment_service
        .analyze_step1_answers(&request.student_id, &request.answers)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/cvp_lite/questions")]
async fn catalog_questions(
    state: web::Data<Arc<AppState>>,
    request: Option<web::Json<CatalogRequest>>,
) -> Result<HttpResponse, AppError> {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let response = state.catalog_service.questions(&request)?;
    Ok(HttpResponse::Ok().json(response))
}
