use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(range(min = 1, message = "AttemptId must be a positive integer"))]
    pub attempt_id: i64,

    #[validate(range(min = 1, message = "QuestionId must be a positive integer"))]
    pub question_id: i64,

    /// None means the user skipped the question. That is a valid submission,
    /// recorded as incorrect.
    pub selected_option_id: Option<i64>,
}
