pub mod quiz_handler;

pub use quiz_handler::{finish_quiz, health_check, list_quizzes, start_quiz, submit_answer};
