use crate::models::domain::{Question, QuestionOption, StudentProfile};

pub mod fixtures {
    use super::*;

    /// A fully populated profile, as produced by the setup flow.
    pub fn complete_profile(student_id: &str) -> StudentProfile {
        let mut profile = StudentProfile::new(student_id, "Kavya Menon");
        profile.grade = Some("11".to_string());
        profile.school_name = Some("Kendriya Vidyalaya".to_string());
        profile.email = Some("kavya@example.com".to_string());
        profile.city = Some("Kochi".to_string());
        profile.country = Some("India".to_string());
        profile.subject_stream = Some("Science".to_string());
        profile.hobbies_and_passions = vec!["coding".to_string(), "dance".to_string()];
        profile.dream_job = Some("game designer".to_string());
        profile.favorite_foods = vec!["appam".to_string(), "puttu".to_string()];
        profile.dietary_preferences = vec!["vegetarian".to_string()];
        profile
    }

    /// A well-formed model question tagged with one RIASEC letter.
    pub fn tagged_question(id: &str, letter: &str) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Prompt for {}", id),
            options: ["a", "b", "c", "d"]
                .iter()
                .map(|option| QuestionOption::new(option, &format!("{} option {}", id, option)))
                .collect(),
            scenario: None,
            tags: Some(vec![letter.to_string()]),
        }
    }
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(status.is_success(), "Expected success status, got: {}", status);
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::RiasecCode;

    #[test]
    fn complete_profile_has_a_context() {
        let context = complete_profile("k1").context();
        assert_eq!(context.dream_job.as_deref(), Some("game designer"));
        assert_eq!(context.hobbies_and_passions.len(), 2);
    }

    #[test]
    fn tagged_question_classifies() {
        let question = tagged_question("x", "S");
        assert_eq!(question.primary_code(), Some(RiasecCode::S));
        assert_eq!(question.options.len(), 4);
    }
}
