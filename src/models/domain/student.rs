use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Student profile document stored in the students collection, keyed by `student_id`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentProfile {
    pub student_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub favorite_foods: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub grade: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StudentProfile {
    pub fn new(student_id: &str, name: &str) -> Self {
        StudentProfile {
            student_id: student_id.to_string(),
            name: name.to_string(),
            favorite_foods: Vec::new(),
            dietary_preferences: Vec::new(),
            grade: None,
            school_name: None,
            email: None,
            phone: None,
            city: None,
            country: None,
            subject_stream: None,
            hobbies_and_passions: Vec::new(),
            dream_job: None,
            future_self_info: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn context(&self) -> StudentContext {
        StudentContext {
            name: non_blank(Some(&self.name)),
            grade: non_blank(self.grade.as_ref()),
            subject_stream: non_blank(self.subject_stream.as_ref()),
            hobbies_and_passions: self.hobbies_and_passions.clone(),
            dream_job: non_blank(self.dream_job.as_ref()),
            city: non_blank(self.city.as_ref()),
            country: non_blank(self.country.as_ref()),
        }
    }
}

/// The subset of a profile that prompts and fallback templates are allowed to read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentContext {
    pub name: Option<String>,
    pub grade: Option<String>,
    pub subject_stream: Option<String>,
    #[serde(default)]
    pub hobbies_and_passions: Vec<String>,
    pub dream_job: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accepts `"12"`, `12` or `null`; older documents stored grades as numbers.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    }))
}

#[cfg(test)]
impl StudentProfile {
    pub fn test_profile(student_id: &str) -> Self {
        let mut profile = StudentProfile::new(student_id, "Asha Rao");
        profile.grade = Some("Grade 9".to_string());
        profile.city = Some("Pune".to_string());
        profile.country = Some("India".to_string());
        profile.hobbies_and_passions = vec!["robotics".to_string(), "chess".to_string()];
        profile.dream_job = Some("aerospace engineer".to_string());
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_accepts_numbers_and_strings() {
        let from_number: StudentProfile =
            serde_json::from_value(serde_json::json!({ "student_id": "s1", "grade": 10 }))
                .expect("numeric grade should deserialize");
        assert_eq!(from_number.grade.as_deref(), Some("10"));

        let from_text: StudentProfile =
            serde_json::from_value(serde_json::json!({ "student_id": "s1", "grade": "XII" }))
                .expect("text grade should deserialize");
        assert_eq!(from_text.grade.as_deref(), Some("XII"));

        let missing: StudentProfile =
            serde_json::from_value(serde_json::json!({ "student_id": "s1" }))
                .expect("missing grade should deserialize");
        assert_eq!(missing.grade, None);
        assert!(missing.favorite_foods.is_empty());
    }

    #[test]
    fn context_drops_blank_fields() {
        let mut profile = StudentProfile::test_profile("s1");
        profile.dream_job = Some("   ".to_string());

        let context = profile.context();
        assert_eq!(context.name.as_deref(), Some("Asha Rao"));
        assert_eq!(context.dream_job, None);
        assert_eq!(context.hobbies_and_passions.len(), 2);
    }
}
