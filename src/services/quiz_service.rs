use std::sync::Arc;

use crate::{
    errors::AppResult, models::dto::response::QuizSummaryDto, repositories::QuizRepository,
};

/// Read-only quiz catalog.
pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    /// Every quiz with its summary stats; `total_questions` is the live
    /// count. Storage failures propagate unmasked.
    pub async fn list_quizzes(&self) -> AppResult<Vec<QuizSummaryDto>> {
        let quizzes = self.repository.list_all().await?;
        Ok(quizzes.iter().map(QuizSummaryDto::from).collect())
    }
}
