use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::{
    constants::prompts::{STEP1_ANALYSIS_PROMPT, STEP1_QUESTIONS_PRIMER, STEP1_QUESTIONS_PROMPT},
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Step1Insight, StudentContext, StudentProfile},
        dto::response::{Step1QuestionsResponse, Step1SubmitResponse},
    },
    repositories::StudentRepository,
    services::{
        assessment::{build_assessment_set, candidates_from_response, interpret, QuotaTable},
        completion_client::{ChatMessage, CompletionClient, CompletionRequest},
    },
};

const QUESTIONS_TEMPERATURE: f32 = 0.7;
const QUESTIONS_MAX_TOKENS: u32 = 900;
const ANALYSIS_TEMPERATURE: f32 = 0.4;
const ANALYSIS_MAX_TOKENS: u32 = 700;

// Checked in order; the first band with any matching fragment wins.
const GRADE_BANDS: &[(&[&str], &str)] = &[
    (
        &["plus two", "12th pass", "12 pass", "xii pass", "xii", "12th"],
        "post-12 (12th Pass)",
    ),
    (&["grade 7", "class 7", " 7", " vii", "vii "], "middle school (Grade 7)"),
    (&["grade 8", "class 8", " 8", " viii", "viii "], "middle school (Grade 8)"),
    (&["grade 11", "class 11", " 11", " xi", "xi "], "senior secondary (Grade 11)"),
    (&["grade 12", "class 12", " 12"], "senior secondary (Grade 12)"),
    (&["grade 10", "class 10", " 10", " x", "x "], "secondary (Grade 10)"),
    (&["grade 9", "class 9", " 9", " ix", "ix "], "secondary (Grade 9)"),
];

pub fn grade_band(grade: &str) -> &'static str {
    let grade = grade.trim().to_lowercase();
    GRADE_BANDS
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| grade.contains(f)))
        .map(|(_, band)| *band)
        .unwrap_or("unspecified")
}

fn distribution_text(quotas: &QuotaTable) -> String {
    quotas
        .iter()
        .map(|(code, count)| format!("{}={}", code, count))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn step1_questions_request(context: &StudentContext, quotas: &QuotaTable) -> CompletionRequest {
    let grade = context.grade.as_deref().unwrap_or_default();
    let system_prompt = STEP1_QUESTIONS_PROMPT
        .replace("{grade}", if grade.is_empty() { "unknown" } else { grade })
        .replace("{band}", grade_band(grade))
        .replace("{distribution}", &distribution_text(quotas));

    let student_context = json!({ "student_profile": context });

    CompletionRequest {
        messages: vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(format!(
                "Generate JSON questions for this student context: {}",
                student_context
            )),
            ChatMessage::assistant(STEP1_QUESTIONS_PRIMER),
        ],
        temperature: QUESTIONS_TEMPERATURE,
        max_tokens: QUESTIONS_MAX_TOKENS,
    }
}

pub fn step1_analysis_request(
    profile: &StudentProfile,
    answers: &BTreeMap<String, String>,
) -> CompletionRequest {
    let payload = json!({
        "profile": {
            "name": profile.name,
            "grade": profile.grade,
            "stream": profile.subject_stream,
            "hobbies": profile.hobbies_and_passions,
            "dream_job": profile.dream_job,
        },
        "answers": answers,
    });

    CompletionRequest {
        messages: vec![
            ChatMessage::system(STEP1_ANALYSIS_PROMPT),
            ChatMessage::user(format!("Analyze and return JSON only: {}", payload)),
        ],
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: ANALYSIS_MAX_TOKENS,
    }
}

/// Reads an insight out of model text; anything unusable becomes the fixed fallback insight.
pub fn parse_insight(raw: &str) -> Step1Insight {
    interpret::extract_json_object(raw)
        .and_then(|value| serde_json::from_value::<Step1Insight>(value).ok())
        .unwrap_or_else(Step1Insight::fallback)
}

pub struct AssessmentService {
    students: Arc<dyn StudentRepository>,
    completion: Arc<dyn CompletionClient>,
    quotas: QuotaTable,
}

impl AssessmentService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self::with_quotas(students, completion, QuotaTable::default())
    }

    pub fn with_quotas(
        students: Arc<dyn StudentRepository>,
        completion: Arc<dyn CompletionClient>,
        quotas: QuotaTable,
    ) -> Self {
        Self {
            students,
            completion,
            quotas,
        }
    }

    async fn load_profile(&self, student_id: &str) -> AppResult<StudentProfile> {
        self.students
            .find_by_student_id(student_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Student with student_id '{}' not found", student_id))
            })
    }

    /// The model's candidate list for this student, or an empty list when the call fails.
    pub async fn step1_candidates(&self, context: &StudentContext) -> Value {
        let request = step1_questions_request(context, &self.quotas);
        log::info!("Step1 question generation prompt | messages={:?}", request.messages);

        match self.completion.complete(request).await {
            Ok(text) => candidates_from_response(&text),
            Err(e) => {
                log::warn!("Step1 question generation failed, using fallback bank: {}", e);
                Value::Array(Vec::new())
            }
        }
    }

    pub async fn questions_for(&self, context: &StudentContext) -> Vec<Question> {
        let candidates = self.step1_candidates(context).await;
        let mut rng = rand::thread_rng();
        build_assessment_set(candidates, &self.quotas, context, &mut rng)
    }

    pub async fn generate_step1_questions(&self, student_id: &str) -> AppResult<Step1QuestionsResponse> {
        let profile = self.load_profile(student_id).await?;
        let questions = self.questions_for(&profile.context()).await;

        log::info!(
            "Generated {} step1 questions for student {}",
            questions.len(),
            student_id
        );

        Ok(Step1QuestionsResponse {
            student_id: profile.student_id,
            questions,
        })
    }

    pub async fn analyze_step1_answers(
        &self,
        student_id: &str,
        answers: &BTreeMap<String, String>,
    ) -> AppResult<Step1SubmitResponse> {
        let profile = self.load_profile(student_id).await?;
        let request = step1_analysis_request(&profile, answers);

        let insight = match self.completion.complete(request).await {
            Ok(text) => parse_insight(&text),
            Err(e) => {
                log::warn!("Step1 analysis failed, using fallback insight: {}", e);
                Step1Insight::fallback()
            }
        };

        Ok(Step1SubmitResponse {
            student_id: profile.student_id,
            insight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::RiasecCode;
    use crate::repositories::student_repository::MockStudentRepository;
    use crate::services::completion_client::MockCompletionClient;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn repository_with(profile: StudentProfile) -> Arc<MockStudentRepository> {
        let mut repository = MockStudentRepository::new();
        repository
            .expect_find_by_student_id()
            .returning(move |id| Ok((id == profile.student_id).then(|| profile.clone())));
        Arc::new(repository)
    }

    fn client_returning(result: AppResult<String>) -> Arc<MockCompletionClient> {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .returning(move |_| result.clone());
        Arc::new(client)
    }

    #[test]
    fn grade_bands_follow_priority() {
        assert_eq!(grade_band("12th Pass"), "post-12 (12th Pass)");
        assert_eq!(grade_band("Class XII"), "post-12 (12th Pass)");
        assert_eq!(grade_band("Grade 7"), "middle school (Grade 7)");
        assert_eq!(grade_band("Class 11"), "senior secondary (Grade 11)");
        assert_eq!(grade_band("Grade 12"), "senior secondary (Grade 12)");
        assert_eq!(grade_band("grade 10"), "secondary (Grade 10)");
        assert_eq!(grade_band("Grade 9"), "secondary (Grade 9)");
        assert_eq!(grade_band("9"), "unspecified");
        assert_eq!(grade_band(""), "unspecified");
    }

    #[test]
    fn questions_prompt_names_grade_band_and_distribution() {
        let context = StudentProfile::test_profile("s1").context();
        let request = step1_questions_request(&context, &QuotaTable::default());

        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 900);
        let system = &request.messages[0].content;
        assert!(system.contains("Student grade/class: Grade 9 (band: secondary (Grade 9))"));
        assert!(system.contains("R=2, I=2, A=2, S=2, E=1, C=1"));
        assert!(request.messages[1].content.contains("\"dream_job\":\"aerospace engineer\""));
    }

    #[test]
    fn unknown_grade_is_named_unknown() {
        let request = step1_questions_request(&StudentContext::default(), &QuotaTable::default());
        assert!(request.messages[0]
            .content
            .contains("Student grade/class: unknown (band: unspecified)"));
    }

    #[test]
    fn insight_parsing_falls_back() {
        assert_eq!(parse_insight("no json here"), Step1Insight::fallback());
        assert_eq!(parse_insight("{\"riasec_scores\": {}}"), Step1Insight::fallback());

        let parsed = parse_insight("Result: {\"summary\": \"Hands-on builder\", \"top_themes\": [\"Making\"]}");
        assert_eq!(parsed.summary, "Hands-on builder");
        assert_eq!(parsed.top_themes, vec!["Making".to_string()]);
    }

    #[actix_web::test]
    async fn failing_model_still_produces_full_set() {
        let service = AssessmentService::new(
            repository_with(StudentProfile::test_profile("s1")),
            client_returning(Err(AppError::UpstreamError("boom".to_string()))),
        );

        let response = service
            .generate_step1_questions("s1")
            .await
            .expect("generation should succeed");

        assert_eq!(response.questions.len(), 10);
        for (k, question) in response.questions.iter().enumerate() {
            assert_eq!(question.id, format!("q{}", k + 1));
            assert_eq!(question.options.len(), 4);
        }
    }

    #[actix_web::test]
    async fn model_candidates_are_preferred() {
        let reply = r#"Here: {"questions": [
            {"id": "m1", "prompt": "Fix a bike or read about bikes?", "options": [
                {"id": "a", "text": "Fix"}, {"id": "b", "text": "Read"}
            ], "tags": ["R", "Bodily-Kinesthetic"]}
        ]}"#;
        let service = AssessmentService::new(
            repository_with(StudentProfile::test_profile("s1")),
            client_returning(Ok(reply.to_string())),
        );
        let context = StudentProfile::test_profile("s1").context();

        let candidates = service.step1_candidates(&context).await;
        let mut rng = StdRng::seed_from_u64(4);
        let questions = build_assessment_set(candidates, &QuotaTable::default(), &context, &mut rng);

        let model_question = questions
            .iter()
            .find(|q| q.prompt == "Fix a bike or read about bikes?")
            .expect("model question should survive");
        assert_eq!(model_question.primary_code(), Some(RiasecCode::R));
        assert_eq!(model_question.options.len(), 4);
        assert_eq!(questions.len(), 10);
    }

    #[actix_web::test]
    async fn unknown_student_is_not_found() {
        let mut client = MockCompletionClient::new();
        client.expect_complete().never();
        let service = AssessmentService::new(
            repository_with(StudentProfile::test_profile("s1")),
            Arc::new(client),
        );

        assert!(matches!(
            service.generate_step1_questions("ghost").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn analysis_uses_fallback_on_failure() {
        let service = AssessmentService::new(
            repository_with(StudentProfile::test_profile("s1")),
            client_returning(Err(AppError::UpstreamError("timeout".to_string()))),
        );
        let answers = BTreeMap::from([("q1".to_string(), "a".to_string())]);

        let response = service
            .analyze_step1_answers("s1", &answers)
            .await
            .expect("analysis should succeed");
        assert_eq!(response.insight, Step1Insight::fallback());
    }
}
