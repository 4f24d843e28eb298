use serde::{Deserialize, Serialize};

/// A recorded answer, identified by the composite key
/// `(attempt_id, question_id)`. Resubmission overwrites the row in place,
/// the same key never produces two rows.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptAnswer {
    pub attempt_id: i64,
    pub question_id: i64,
    pub selected_option_id: Option<i64>, // None = the user skipped the question
    pub is_correct: bool, // snapshot taken at submit time, never re-derived
}
