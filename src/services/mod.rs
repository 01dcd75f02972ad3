pub mod assessment;
pub mod assessment_service;
pub mod catalog_service;
pub mod completion_client;
pub mod recipe_service;
pub mod student_service;
