use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::AttemptAnswer};

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// The stored answer for the composite key, or None.
    async fn find(&self, attempt_id: i64, question_id: i64) -> AppResult<Option<AttemptAnswer>>;
    /// Inserts or overwrites the answer for `(attempt_id, question_id)`.
    /// Must be atomic on the composite key: a concurrent resubmission may
    /// lose the value race but can never produce a duplicate row.
    async fn upsert(&self, answer: &AttemptAnswer) -> AppResult<()>;
    async fn find_by_attempt(&self, attempt_id: i64) -> AppResult<Vec<AttemptAnswer>>;
}

pub struct MongoAnswerRepository {
    collection: Collection<AttemptAnswer>,
}

impl MongoAnswerRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.get_collection("attempt_answers"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for attempt_answers collection");

        // The unique compound index backs the upsert: one row per
        // attempt+question, even under concurrent submits.
        let composite_key_index = IndexModel::builder()
            .keys(doc! { "attempt_id": 1, "question_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("attempt_question_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(composite_key_index).await?;

        log::info!("Successfully created indexes for attempt_answers collection");
        Ok(())
    }
}

#[async_trait]
impl AnswerRepository for MongoAnswerRepository {
    async fn find(&self, attempt_id: i64, question_id: i64) -> AppResult<Option<AttemptAnswer>> {
        let answer = self
            .collection
            .find_one(doc! { "attempt_id": attempt_id, "question_id": question_id })
            .await?;
        Ok(answer)
    }

    async fn upsert(&self, answer: &AttemptAnswer) -> AppResult<()> {
        let selected = to_bson(&answer.selected_option_id)?;

        self.collection
            .update_one(
                doc! {
                    "attempt_id": answer.attempt_id,
                    "question_id": answer.question_id
                },
                doc! {
                    "$set": {
                        "selected_option_id": selected,
                        "is_correct": answer.is_correct
                    }
                },
            )
            .upsert(true)
            .await?;

        Ok(())
    }

    async fn find_by_attempt(&self, attempt_id: i64) -> AppResult<Vec<AttemptAnswer>> {
        let answers = self
            .collection
            .find(doc! { "attempt_id": attempt_id })
            .await?
            .try_collect()
            .await?;
        Ok(answers)
    }
}
