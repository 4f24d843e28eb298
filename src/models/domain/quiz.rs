use serde::{Deserialize, Serialize};

use crate::models::domain::question::Question;

/// A quiz as authored: questions and options embedded in a single document.
/// Quiz content is seeded out of band and read-only to the attempt engine.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub pass_percentage: f64,         // 0-100, inclusive threshold
    pub time_limit_seconds: Option<i64>, // None = unlimited
    pub question_order_type: QuestionOrderType,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum QuestionOrderType {
    Sequential,
    Random,
}

impl Quiz {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}
