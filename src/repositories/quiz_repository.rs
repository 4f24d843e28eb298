use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Question, Quiz},
};

/// Read-only access to authored quiz content. Quizzes are stored as one
/// document per quiz with questions and options embedded, so every method
/// resolves from a single find.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// The quiz with its full question and option tree, or None.
    async fn find_with_questions(&self, quiz_id: i64) -> AppResult<Option<Quiz>>;
    /// Every quiz, questions loaded (summary counts derive from them).
    async fn list_all(&self) -> AppResult<Vec<Quiz>>;
    /// A single question with its options, located across all quizzes.
    async fn find_question_with_options(&self, question_id: i64) -> AppResult<Option<Question>>;
    /// All questions of a quiz, ascending by `order_in_quiz` (stable on ties).
    async fn questions_in_order(&self, quiz_id: i64) -> AppResult<Vec<Question>>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let question_id_index = IndexModel::builder()
            .keys(doc! { "questions.id": 1 })
            .options(IndexOptions::builder().name("question_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(question_id_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_with_questions(&self, quiz_id: i64) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": quiz_id }).await?;
        Ok(quiz)
    }

    async fn list_all(&self) -> AppResult<Vec<Quiz>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "id": 1 }).await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes)
    }

    async fn find_question_with_options(&self, question_id: i64) -> AppResult<Option<Question>> {
        let quiz = self
            .collection
            .find_one(doc! { "questions.id": question_id })
            .await?;

        Ok(quiz.and_then(|q| q.questions.into_iter().find(|question| question.id == question_id)))
    }

    async fn questions_in_order(&self, quiz_id: i64) -> AppResult<Vec<Question>> {
        let quiz = self.collection.find_one(doc! { "id": quiz_id }).await?;

        let mut questions = quiz.map(|q| q.questions).unwrap_or_default();
        // sort_by_key is stable, ties keep their stored order
        questions.sort_by_key(|q| q.order_in_quiz);
        Ok(questions)
    }
}
