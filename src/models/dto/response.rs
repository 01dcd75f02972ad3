use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Question, Step1Insight, StudentProfile};

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSetupResponse {
    pub student_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    pub student_id: String,
    pub name: String,
    pub grade: Option<String>,
    pub school_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub subject_stream: Option<String>,
    pub hobbies_and_passions: Vec<String>,
    pub dream_job: Option<String>,
    pub future_self_info: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<StudentProfile> for StudentSummary {
    fn from(profile: StudentProfile) -> Self {
        StudentSummary {
            student_id: profile.student_id,
            name: profile.name,
            grade: profile.grade,
            school_name: profile.school_name,
            city: profile.city,
            country: profile.country,
            subject_stream: profile.subject_stream,
            hobbies_and_passions: profile.hobbies_and_passions,
            dream_job: profile.dream_job,
            future_self_info: profile.future_self_info,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentListResponse {
    pub users: Vec<StudentSummary>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteStudentResponse {
    pub student_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Step1QuestionsResponse {
    pub student_id: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Step1SubmitResponse {
    pub student_id: String,
    pub insight: Step1Insight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelTranslations {
    pub hi: String,
    pub en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogOption {
    pub id: String,
    pub label: String,
    pub label_translations: LabelTranslations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogQuestion {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub options: Vec<CatalogOption>,
    pub required: bool,
    pub category_id: String,
    pub weight: f64,
    pub lang: String,
    pub created_at: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub theory: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentInfo {
    pub id: String,
    pub step_type: String,
    pub title: String,
    pub scientific_basis: String,
    pub generated_at: String,
    pub categories: Vec<AssessmentCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogMeta {
    pub page: u32,
    pub page_size: u32,
    pub total: usize,
    pub assessment: AssessmentInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub data: Vec<CatalogQuestion>,
    pub meta: CatalogMeta,
    pub links: CatalogLinks,
}
