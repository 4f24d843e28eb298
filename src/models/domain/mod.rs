pub mod answer;
pub mod attempt;
pub mod question;
pub mod quiz;

pub use answer::AttemptAnswer;
pub use attempt::QuizAttempt;
pub use question::{Question, QuestionOption};
pub use quiz::Quiz;
