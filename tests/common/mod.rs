#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use cvp_lite_server::{
    errors::{AppError, AppResult},
    models::domain::StudentProfile,
    repositories::StudentRepository,
    services::completion_client::{CompletionClient, CompletionRequest},
};

#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: Arc<RwLock<HashMap<String, StudentProfile>>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, profile: StudentProfile) {
        self.students
            .write()
            .await
            .insert(profile.student_id.clone(), profile);
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_by_student_id(&self, student_id: &str) -> AppResult<Option<StudentProfile>> {
        Ok(self.students.read().await.get(student_id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<StudentProfile>> {
        let students = self.students.read().await;
        let mut items: Vec<_> = students.values().cloned().collect();
        items.sort_by(|a, b| a.student_id.cmp(&b.student_id));
        Ok(items)
    }

    async fn upsert(&self, mut profile: StudentProfile) -> AppResult<StudentProfile> {
        let mut students = self.students.write().await;
        let now = Utc::now();

        profile.created_at = students
            .get(&profile.student_id)
            .and_then(|existing| existing.created_at)
            .or(Some(now));
        profile.updated_at = Some(now);

        students.insert(profile.student_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn delete(&self, student_id: &str) -> AppResult<bool> {
        Ok(self.students.write().await.remove(student_id).is_some())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Replies with a fixed outcome and counts how often it was asked.
pub struct ScriptedCompletionClient {
    reply: AppResult<String>,
    calls: AtomicUsize,
}

impl ScriptedCompletionClient {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err(AppError::UpstreamError("model unavailable".to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, _request: CompletionRequest) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

pub fn profile(student_id: &str) -> StudentProfile {
    let mut profile = StudentProfile::new(student_id, "Neha Iyer");
    profile.grade = Some("8".to_string());
    profile.city = Some("Chennai".to_string());
    profile.country = Some("India".to_string());
    profile.hobbies_and_passions = vec!["astronomy".to_string()];
    profile.dream_job = Some("astronaut".to_string());
    profile.favorite_foods = vec!["pongal".to_string()];
    profile.dietary_preferences = vec!["vegetarian".to_string()];
    profile
}
