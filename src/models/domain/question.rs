use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub text: String,
    pub image: Option<String>, // URL or path, display only
    pub order_in_quiz: i32,    // authored position, used for Sequential and review order
    pub options: Vec<QuestionOption>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
}

impl Question {
    /// The option flagged correct, if the question defines one. A question
    /// with no correct option is data we tolerate, not an error.
    pub fn correct_option(&self) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.is_correct)
    }

    pub fn option(&self, option_id: i64) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}
