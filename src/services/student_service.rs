use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::StudentProfile,
        dto::{
            request::ProfileSetupRequest,
            response::{
                DeleteStudentResponse, ProfileSetupResponse, StudentListResponse, StudentSummary,
            },
        },
    },
    repositories::StudentRepository,
};

const MISSING: &str = "—";
const ID_PART_MAX_CHARS: usize = 12;

pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
}

/// `<first>-<last>-<grade>-<YYYYMMDDHHMMSS>`; name parts lowercased, spaces removed, 12 chars max.
pub fn compose_student_id(first_name: &str, last_name: &str, grade: &str, at: DateTime<Utc>) -> String {
    fn id_part(value: &str) -> String {
        value
            .trim()
            .to_lowercase()
            .replace(' ', "")
            .chars()
            .take(ID_PART_MAX_CHARS)
            .collect()
    }

    format!(
        "{}-{}-{}-{}",
        id_part(first_name),
        id_part(last_name),
        grade.trim().to_lowercase(),
        at.format("%Y%m%d%H%M%S")
    )
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

fn setup_message(profile: &StudentProfile) -> String {
    let location: Vec<&str> = [profile.city.as_deref(), profile.country.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    let location = if location.is_empty() {
        MISSING.to_string()
    } else {
        location.join(", ")
    };
    let hobbies = if profile.hobbies_and_passions.is_empty() {
        MISSING.to_string()
    } else {
        profile.hobbies_and_passions.join(", ")
    };

    format!(
        "Amazing! Your Profile is Complete\n\
         Here's what I learned about you:\n\
         ** Meet {name}**\n\
         - Grade {grade} student at {school}\n\
         - Lives in {location}\n\
         - Currently interested in: {stream}\n\
         - Passionate about: {hobbies}\n\
         - Dreams of: {dream_job}\n\
         - Future Vision: {future}\n\n\
         **Your YPD ID: {student_id}**\n\
         *This information will help create the most relevant and personal career guidance for you.*\n\n\
         ## Ready to Begin?\n\
         You're all set to start your career guidance journey!\n\n\
         Your profile information will be used to provide personalized insights and recommendations.\n",
        name = profile.name,
        grade = or_missing(profile.grade.as_deref()),
        school = or_missing(profile.school_name.as_deref()),
        location = location,
        stream = or_missing(profile.subject_stream.as_deref()),
        hobbies = hobbies,
        dream_job = or_missing(profile.dream_job.as_deref()),
        future = or_missing(profile.future_self_info.as_deref()),
        student_id = profile.student_id,
    )
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    pub async fn setup_profile(&self, request: ProfileSetupRequest) -> AppResult<ProfileSetupResponse> {
        self.setup_profile_at(request, Utc::now()).await
    }

    pub(crate) async fn setup_profile_at(
        &self,
        request: ProfileSetupRequest,
        now: DateTime<Utc>,
    ) -> AppResult<ProfileSetupResponse> {
        request.validate()?;

        let grade = request
            .grade
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let student_id = trimmed(request.student_id.as_deref()).unwrap_or_else(|| {
            compose_student_id(&request.first_name, &request.last_name, &grade, now)
        });
        let name = format!("{} {}", request.first_name.trim(), request.last_name.trim())
            .trim()
            .to_string();

        let mut profile = StudentProfile::new(&student_id, &name);
        profile.grade = Some(grade);
        profile.school_name = trimmed(Some(request.school_name.as_str()));
        profile.email = trimmed(Some(request.email.as_str()));
        profile.phone = trimmed(request.phone.as_deref());
        profile.city = trimmed(request.city.as_deref());
        profile.country = trimmed(request.country.as_deref());
        profile.subject_stream = trimmed(request.subject_stream.as_deref());
        profile.hobbies_and_passions = request
            .hobbies_and_passions
            .iter()
            .filter_map(|h| trimmed(Some(h.as_str())))
            .collect();
        profile.dream_job = trimmed(request.dream_job.as_deref());
        profile.future_self_info = trimmed(request.future_self_info.as_deref());

        let stored = self.repository.upsert(profile).await?;
        log::info!("Profile setup complete for student {}", stored.student_id);

        Ok(ProfileSetupResponse {
            message: setup_message(&stored),
            student_id: stored.student_id,
        })
    }

    pub async fn get_profile(&self, student_id: &str) -> AppResult<StudentProfile> {
        self.repository
            .find_by_student_id(student_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Student with student_id '{}' not found", student_id))
            })
    }

    pub async fn list_profiles(&self) -> AppResult<StudentListResponse> {
        let users: Vec<StudentSummary> = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .map(StudentSummary::from)
            .collect();

        Ok(StudentListResponse {
            total_count: users.len(),
            users,
        })
    }

    pub async fn upsert_profile(&self, mut profile: StudentProfile) -> AppResult<StudentProfile> {
        profile.student_id = profile.student_id.trim().to_string();
        if profile.student_id.is_empty() {
            return Err(AppError::ValidationError(
                "student_id must not be empty".to_string(),
            ));
        }

        self.repository.upsert(profile).await
    }

    pub async fn delete_profile(&self, student_id: &str) -> AppResult<DeleteStudentResponse> {
        if !self.repository.delete(student_id).await? {
            return Err(AppError::NotFound(format!(
                "Student with student_id '{}' not found",
                student_id
            )));
        }

        Ok(DeleteStudentResponse {
            student_id: student_id.to_string(),
            message: "User deleted successfully".to_string(),
        })
    }
}
