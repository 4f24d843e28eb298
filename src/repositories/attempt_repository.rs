use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::Deserialize;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::QuizAttempt,
};

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Persists a new attempt and returns it with its server-assigned id.
    /// The write is acknowledged before this returns.
    async fn insert(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_by_id(&self, attempt_id: i64) -> AppResult<Option<QuizAttempt>>;
    /// Overwrites the stored attempt (used once, at finish).
    async fn save(&self, attempt: &QuizAttempt) -> AppResult<()>;
}

#[derive(Deserialize)]
struct Counter {
    seq: i64,
}

pub struct MongoAttemptRepository {
    collection: Collection<QuizAttempt>,
    counters: Collection<Counter>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_collection("quiz_attempts"),
            counters: db.get_collection("counters"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for quiz_attempts collection");
        Ok(())
    }

    /// Atomically reserves the next attempt id from the counters collection.
    async fn next_id(&self) -> AppResult<i64> {
        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": "quiz_attempts" }, doc! { "$inc": { "seq": 1 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Counter for quiz_attempts was not returned".to_string())
            })?;

        Ok(counter.seq)
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn insert(&self, mut attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        attempt.id = self.next_id().await?;
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, attempt_id: i64) -> AppResult<Option<QuizAttempt>> {
        let attempt = self.collection.find_one(doc! { "id": attempt_id }).await?;
        Ok(attempt)
    }

    async fn save(&self, attempt: &QuizAttempt) -> AppResult<()> {
        self.collection
            .replace_one(doc! { "id": attempt.id }, attempt)
            .await?;
        Ok(())
    }
}
