use std::sync::Arc;

use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{domain::StudentProfile, dto::request::ProfileSetupRequest},
};

#[post("/user/setup")]
async fn setup_profile(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ProfileSetupRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.student_service.setup_profile(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/user")]
async fn list_profiles(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let response = state.student_service.list_profiles().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/user/{student_id}")]
async fn get_profile(
    state: web::Data<Arc<AppState>>,
    student_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let profile = state.student_service.get_profile(&student_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[post("/user")]
async fn upsert_profile(
    state: web::Data<Arc<AppState>>,
    profile: web::Json<StudentProfile>,
) -> Result<HttpResponse, AppError> {
    let stored = state.student_service.upsert_profile(profile.into_inner()).await?;
    Ok(HttpResponse::Ok().json(stored))
}

#[delete("/user/{student_id}")]
async fn delete_profile(
    state: web::Data<Arc<AppState>>,
    student_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.student_service.delete_profile(&student_id).await?;
    Ok(HttpResponse::Ok().json(response))
}
