pub mod assessment_handler;
pub mod health_handler;
pub mod recipe_handler;
pub mod student_handler;

use actix_web::web;

pub use assessment_handler::{catalog_questions, step1_questions, step1_submit};
pub use health_handler::{health_check, root};
pub use recipe_handler::generate_recipe;
pub use student_handler::{delete_profile, get_profile, list_profiles, setup_profile, upsert_profile};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(health_check)
        .service(setup_profile)
        .service(list_profiles)
        .service(get_profile)
        .service(upsert_profile)
        .service(delete_profile)
        .service(step1_questions)
        .service(step1_submit)
        .service(catalog_questions)
        .service(generate_recipe);
}
