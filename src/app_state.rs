use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AnswerRepository, AttemptRepository, MongoAnswerRepository, MongoAttemptRepository,
        MongoQuizRepository, QuizRepository,
    },
    services::{QuizAttemptService, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<QuizAttemptService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let answer_repository = Arc::new(MongoAnswerRepository::new(&db));
        answer_repository.ensure_indexes().await?;

        Ok(Self::with_repositories(
            config,
            quiz_repository,
            attempt_repository,
            answer_repository,
        ))
    }

    /// Wires the services over arbitrary repository implementations.
    /// Integration tests use this with in-memory storage.
    pub fn with_repositories(
        config: Config,
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
        answer_repository: Arc<dyn AnswerRepository>,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(quiz_repository.clone()));
        let attempt_service = Arc::new(QuizAttemptService::new(
            quiz_repository,
            attempt_repository,
            answer_repository,
        ));

        Self {
            quiz_service,
            attempt_service,
            config: Arc::new(config),
        }
    }
}
