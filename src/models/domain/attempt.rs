use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user's single pass through a quiz, bounded by a start and finish call.
/// `end_time`, `score` and `is_passed` are only set when the attempt is
/// finished; a finished attempt is immutable.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_passed: Option<bool>,
}

impl QuizAttempt {
    /// A fresh attempt stamped with the server clock. The id is assigned by
    /// the repository on insert; client-supplied timestamps are never
    /// accepted, elapsed-time scoring is tamper-resistant only if both
    /// instants come from the server.
    pub fn start(quiz_id: i64) -> Self {
        QuizAttempt {
            id: 0,
            quiz_id,
            start_time: Utc::now(),
            end_time: None,
            score: None,
            is_passed: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}
