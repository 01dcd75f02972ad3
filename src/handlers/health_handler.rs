use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/")]
async fn root(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("{} API", state.config.app_name),
        "version": state.config.app_version,
        "docs": "/docs"
    }))
}

#[get("/health")]
async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let storage = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(()) => "mongodb",
            Err(e) => {
                log::warn!("MongoDB health check failed: {}", e);
                "mongodb-unreachable"
            }
        },
        None => "in-memory",
    };
    let llm = if state.llm_configured() {
        "configured"
    } else {
        "not-configured"
    };

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "services": {
            "storage": storage,
            "llm": llm
        }
    }))
}
