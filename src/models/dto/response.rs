use serde::Serialize;

use crate::models::domain::{Question, Quiz};

/// Catalog listing entry: quiz metadata plus a live question count.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSummaryDto {
    pub quiz_id: i64,
    pub name: String,
    pub description: String,
    pub pass_percentage: f64,
    pub time_limit_seconds: Option<i64>,
    pub total_questions: usize,
}

impl From<&Quiz> for QuizSummaryDto {
    fn from(quiz: &Quiz) -> Self {
        QuizSummaryDto {
            quiz_id: quiz.id,
            name: quiz.name.clone(),
            description: quiz.description.clone(),
            pass_percentage: quiz.pass_percentage,
            time_limit_seconds: quiz.time_limit_seconds,
            total_questions: quiz.question_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizStartResponseDto {
    pub attempt_id: i64,
    pub quiz_name: String,
    pub time_limit_seconds: Option<i64>,
    pub questions: Vec<QuestionDto>,
}

/// A question as presented to the quiz taker. Options deliberately carry no
/// correctness flag.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub question_id: i64,
    pub text: String,
    pub image: Option<String>,
    pub options: Vec<OptionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionDto {
    pub option_id: i64,
    pub text: String,
}

impl From<&Question> for QuestionDto {
    fn from(question: &Question) -> Self {
        QuestionDto {
            question_id: question.id,
            text: question.text.clone(),
            image: question.image.clone(),
            options: question
                .options
                .iter()
                .map(|o| OptionDto {
                    option_id: o.id,
                    text: o.text.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerFeedbackDto {
    pub is_correct: bool,
    /// None when the question defines no correct option (tolerated data
    /// quality gap, not an error).
    pub correct_option_id: Option<i64>,
    pub correct_option_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResultDto {
    pub total_time_taken_seconds: f64,
    pub correct_answers_count: i32,
    pub incorrect_answers_count: i32,
    pub is_passed: bool,
    pub pass_percentage_required: f64,
    pub time_limit_seconds: Option<i64>,
    pub review_questions: Vec<ReviewQuestionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewQuestionDto {
    pub question_id: i64,
    pub text: String,
    pub your_answer_text: String, // "No answer" when the question was skipped
    pub correct_answer_text: Option<String>,
    pub was_correct: bool,
}
