use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::{IndexOptions, UpdateOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::StudentProfile,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_student_id(&self, student_id: &str) -> AppResult<Option<StudentProfile>>;
    async fn find_all(&self) -> AppResult<Vec<StudentProfile>>;
    /// Inserts or updates by `student_id` and returns the stored document.
    async fn upsert(&self, profile: StudentProfile) -> AppResult<StudentProfile>;
    /// `false` when no document matched.
    async fn delete(&self, student_id: &str) -> AppResult<bool>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

/// Rewrites a scalar `favorite_food` into `favorite_foods: [value]`.
/// Returns whether the document changed.
pub fn migrate_legacy_favorite_food(document: &mut Document) -> bool {
    if document.contains_key("favorite_foods") {
        return false;
    }
    let Some(legacy) = document.remove("favorite_food") else {
        return false;
    };

    let foods = match legacy {
        Bson::Array(items) => items,
        Bson::Null => Vec::new(),
        value => vec![value],
    };
    document.insert("favorite_foods", Bson::Array(foods));
    true
}

/// Converts BSON datetimes written by older clients into RFC 3339 strings.
fn normalize_timestamps(document: &mut Document) {
    for key in ["created_at", "updated_at"] {
        if let Some(Bson::DateTime(value)) = document.get(key) {
            let normalized = value
                .try_to_rfc3339_string()
                .map(Bson::String)
                .unwrap_or(Bson::Null);
            document.insert(key, normalized);
        }
    }
}

fn decode_profile(mut document: Document) -> AppResult<StudentProfile> {
    document.remove("_id");
    normalize_timestamps(&mut document);
    Ok(bson::from_document(document)?)
}

pub struct MongoStudentRepository {
    collection: Collection<Document>,
}

impl MongoStudentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.students(),
        }
    }

    async fn persist_migration(&self, document: &Document) -> AppResult<()> {
        let Some(student_id) = document.get_str("student_id").ok() else {
            return Ok(());
        };
        let foods = document
            .get("favorite_foods")
            .cloned()
            .unwrap_or_else(|| Bson::Array(Vec::new()));

        self.collection
            .update_one(
                doc! { "student_id": student_id },
                doc! {
                    "$set": { "favorite_foods": foods, "updated_at": bson::DateTime::now() },
                    "$unset": { "favorite_food": "" },
                },
            )
            .await?;

        log::info!("Migrated student {} from favorite_food to favorite_foods", student_id);
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    async fn find_by_student_id(&self, student_id: &str) -> AppResult<Option<StudentProfile>> {
        let Some(mut document) = self
            .collection
            .find_one(doc! { "student_id": student_id })
            .await?
        else {
            return Ok(None);
        };

        if migrate_legacy_favorite_food(&mut document) {
            self.persist_migration(&document).await?;
        }

        decode_profile(document).map(Some)
    }

    async fn find_all(&self) -> AppResult<Vec<StudentProfile>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        let mut profiles = Vec::with_capacity(documents.len());
        let mut migrated = 0;
        for mut document in documents {
            if migrate_legacy_favorite_food(&mut document) {
                self.persist_migration(&document).await?;
                migrated += 1;
            }
            match decode_profile(document) {
                Ok(profile) => profiles.push(profile),
                Err(e) => log::warn!("Skipping unreadable student document: {}", e),
            }
        }

        if migrated > 0 {
            log::info!("Migrated {} students from favorite_food to favorite_foods", migrated);
        }

        Ok(profiles)
    }

    async fn upsert(&self, profile: StudentProfile) -> AppResult<StudentProfile> {
        let student_id = profile.student_id.clone();
        let now = bson::DateTime::now();

        let mut fields = bson::to_document(&profile)?;
        fields.remove("created_at");
        fields.insert("updated_at", now);

        let options = UpdateOptions::builder().upsert(true).build();
        let result = self
            .collection
            .update_one(
                doc! { "student_id": &student_id },
                doc! {
                    "$set": fields,
                    "$setOnInsert": { "created_at": now },
                },
            )
            .with_options(options)
            .await?;

        log::info!(
            "Student {} {}",
            student_id,
            if result.upserted_id.is_some() { "created" } else { "updated" }
        );

        self.find_by_student_id(&student_id).await?.ok_or_else(|| {
            AppError::InternalError(format!(
                "Student '{}' was not readable after upsert",
                student_id
            ))
        })
    }

    async fn delete(&self, student_id: &str) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "student_id": student_id })
            .await?;

        if result.deleted_count == 0 {
            log::warn!("No student deleted for id {} (not found)", student_id);
            return Ok(false);
        }

        log::info!("Deleted student {}", student_id);
        Ok(true)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "student_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        log::info!("Ensured unique index on student_id");
        Ok(())
    }
}
