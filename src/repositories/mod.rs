pub mod answer_repository;
pub mod attempt_repository;
pub mod quiz_repository;

pub use answer_repository::{AnswerRepository, MongoAnswerRepository};
pub use attempt_repository::{AttemptRepository, MongoAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
