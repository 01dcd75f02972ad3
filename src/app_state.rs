use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoStudentRepository, StudentRepository},
    services::{
        assessment_service::AssessmentService,
        catalog_service::CatalogService,
        completion_client::{CompletionClient, OpenAiCompletionClient},
        recipe_service::RecipeService,
        student_service::StudentService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub student_service: Arc<StudentService>,
    pub assessment_service: Arc<AssessmentService>,
    pub catalog_service: Arc<CatalogService>,
    pub recipe_service: Arc<RecipeService>,
    /// `None` when profiles live outside MongoDB, as in tests.
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let student_repository = Arc::new(MongoStudentRepository::new(&db));
        student_repository.ensure_indexes().await?;

        let completion = Arc::new(OpenAiCompletionClient::from_config(&config));

        Ok(Self::from_parts(config, student_repository, completion, Some(db)))
    }

    pub fn from_parts(
        config: Config,
        students: Arc<dyn StudentRepository>,
        completion: Arc<dyn CompletionClient>,
        db: Option<Database>,
    ) -> Self {
        Self {
            student_service: Arc::new(StudentService::new(students.clone())),
            assessment_service: Arc::new(AssessmentService::new(students.clone(), completion.clone())),
            catalog_service: Arc::new(CatalogService::new()),
            recipe_service: Arc::new(RecipeService::new(students, completion)),
            db,
            config: Arc::new(config),
        }
    }

    pub fn llm_configured(&self) -> bool {
        !self.config.openai_api_key.expose_secret().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::student_repository::MockStudentRepository;
    use crate::services::completion_client::MockCompletionClient;
    use secrecy::SecretString;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn llm_is_reported_from_the_api_key() {
        let mut config = Config::test_config();
        let state = AppState::from_parts(
            config.clone(),
            Arc::new(MockStudentRepository::new()),
            Arc::new(MockCompletionClient::new()),
            None,
        );
        assert!(state.llm_configured());

        config.openai_api_key = SecretString::from(String::new());
        let state = AppState::from_parts(
            config,
            Arc::new(MockStudentRepository::new()),
            Arc::new(MockCompletionClient::new()),
            None,
        );
        assert!(!state.llm_configured());
    }
}
