use std::collections::BTreeMap;

use serde::Deserialize;
use validator::Validate;

use crate::models::domain::student::string_or_number;
use crate::models::domain::SimilarRecipe;

/// Step 0 profile setup. `student_id` is composed from name, grade and time when omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileSetupRequest {
    #[serde(default)]
    pub student_id: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(required(message = "grade is required"))]
    pub grade: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub school_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub subject_stream: Option<String>,
    #[serde(default)]
    pub hobbies_and_passions: Vec<String>,
    #[serde(default)]
    pub dream_job: Option<String>,
    #[serde(default)]
    pub future_self_info: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Step1QuestionsRequest {
    #[validate(length(min = 1))]
    pub student_id: String,
}

/// Answers keyed by question id, valued by the chosen option id.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Step1SubmitRequest {
    #[validate(length(min = 1))]
    pub student_id: String,

    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CatalogRequest {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u32,

    #[serde(default)]
    pub category_id: Option<String>,
}

impl Default for CatalogRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            category_id: None,
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(length(min = 1))]
    pub student_id: String,

    /// Candidates from an external similarity search, if the caller ran one.
    #[serde(default)]
    pub similar_recipes: Vec<SimilarRecipe>,
}
