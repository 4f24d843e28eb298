#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quiz_server::{
    errors::AppResult,
    models::domain::quiz::QuestionOrderType,
    models::domain::{AttemptAnswer, Question, QuestionOption, Quiz, QuizAttempt},
    repositories::{AnswerRepository, AttemptRepository, QuizRepository},
    services::QuizAttemptService,
};

pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<i64, Quiz>>,
}

impl InMemoryQuizRepository {
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes: RwLock::new(quizzes.into_iter().map(|q| (q.id, q)).collect()),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_with_questions(&self, quiz_id: i64) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(&quiz_id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = self.quizzes.read().await.values().cloned().collect();
        quizzes.sort_by_key(|q| q.id);
        Ok(quizzes)
    }

    async fn find_question_with_options(&self, question_id: i64) -> AppResult<Option<Question>> {
        Ok(self
            .quizzes
            .read()
            .await
            .values()
            .flat_map(|quiz| quiz.questions.iter())
            .find(|question| question.id == question_id)
            .cloned())
    }

    async fn questions_in_order(&self, quiz_id: i64) -> AppResult<Vec<Question>> {
        let mut questions = self
            .quizzes
            .read()
            .await
            .get(&quiz_id)
            .map(|quiz| quiz.questions.clone())
            .unwrap_or_default();
        questions.sort_by_key(|q| q.order_in_quiz);
        Ok(questions)
    }
}

pub struct InMemoryAttemptRepository {
    attempts: RwLock<HashMap<i64, QuizAttempt>>,
    next_id: RwLock<i64>,
}

impl InMemoryAttemptRepository {
    pub fn new() -> Self {
        Self {
            attempts: RwLock::new(HashMap::new()),
            next_id: RwLock::new(0),
        }
    }

    pub async fn count(&self) -> usize {
        self.attempts.read().await.len()
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn insert(&self, mut attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        attempt.id = *next_id;

        self.attempts.write().await.insert(attempt.id, attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, attempt_id: i64) -> AppResult<Option<QuizAttempt>> {
        Ok(self.attempts.read().await.get(&attempt_id).cloned())
    }

    async fn save(&self, attempt: &QuizAttempt) -> AppResult<()> {
        self.attempts.write().await.insert(attempt.id, attempt.clone());
        Ok(())
    }
}

pub struct InMemoryAnswerRepository {
    answers: RwLock<HashMap<(i64, i64), AttemptAnswer>>,
}

impl InMemoryAnswerRepository {
    pub fn new() -> Self {
        Self {
            answers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn count(&self) -> usize {
        self.answers.read().await.len()
    }
}

#[async_trait]
impl AnswerRepository for InMemoryAnswerRepository {
    async fn find(&self, attempt_id: i64, question_id: i64) -> AppResult<Option<AttemptAnswer>> {
        Ok(self
            .answers
            .read()
            .await
            .get(&(attempt_id, question_id))
            .cloned())
    }

    async fn upsert(&self, answer: &AttemptAnswer) -> AppResult<()> {
        self.answers
            .write()
            .await
            .insert((answer.attempt_id, answer.question_id), answer.clone());
        Ok(())
    }

    async fn find_by_attempt(&self, attempt_id: i64) -> AppResult<Vec<AttemptAnswer>> {
        let mut answers: Vec<AttemptAnswer> = self
            .answers
            .read()
            .await
            .values()
            .filter(|a| a.attempt_id == attempt_id)
            .cloned()
            .collect();
        answers.sort_by_key(|a| a.question_id);
        Ok(answers)
    }
}

pub struct TestHarness {
    pub service: QuizAttemptService,
    pub quiz_repository: Arc<InMemoryQuizRepository>,
    pub attempt_repository: Arc<InMemoryAttemptRepository>,
    pub answer_repository: Arc<InMemoryAnswerRepository>,
}

/// An attempt service wired over in-memory storage seeded with `quizzes`.
pub fn attempt_service_with(quizzes: Vec<Quiz>) -> TestHarness {
    let quiz_repository = Arc::new(InMemoryQuizRepository::new(quizzes));
    let attempt_repository = Arc::new(InMemoryAttemptRepository::new());
    let answer_repository = Arc::new(InMemoryAnswerRepository::new());

    let service = QuizAttemptService::new(
        quiz_repository.clone(),
        attempt_repository.clone(),
        answer_repository.clone(),
    );

    TestHarness {
        service,
        quiz_repository,
        attempt_repository,
        answer_repository,
    }
}

pub fn question(
    id: i64,
    quiz_id: i64,
    order_in_quiz: i32,
    text: &str,
    options: Vec<(i64, &str, bool)>,
) -> Question {
    Question {
        id,
        quiz_id,
        text: text.to_string(),
        image: None,
        order_in_quiz,
        options: options
            .into_iter()
            .map(|(option_id, option_text, is_correct)| QuestionOption {
                id: option_id,
                text: option_text.to_string(),
                is_correct,
            })
            .collect(),
    }
}

fn quiz(
    id: i64,
    name: &str,
    pass_percentage: f64,
    time_limit_seconds: Option<i64>,
    question_order_type: QuestionOrderType,
    questions: Vec<Question>,
) -> Quiz {
    Quiz {
        id,
        name: name.to_string(),
        description: format!("{name} description"),
        pass_percentage,
        time_limit_seconds,
        question_order_type,
        questions,
    }
}

/// Two questions, Sequential, 60% to pass, no time limit.
pub fn science_quiz() -> Quiz {
    quiz(
        2,
        "Science Fundamentals",
        60.0,
        None,
        QuestionOrderType::Sequential,
        vec![
            question(
                21,
                2,
                1,
                "What is H2O commonly known as?",
                vec![(211, "Salt", false), (212, "Water", true)],
            ),
            question(
                22,
                2,
                2,
                "What gas do plants absorb?",
                vec![(221, "Oxygen", false), (222, "Carbon dioxide", true)],
            ),
        ],
    )
}

/// A quiz that exists but has no questions; starting it must be rejected.
pub fn empty_quiz() -> Quiz {
    quiz(
        3,
        "Empty Quiz",
        50.0,
        None,
        QuestionOrderType::Sequential,
        vec![],
    )
}

/// Two questions, 50% to pass, no time limit (the end-to-end scenario quiz).
pub fn half_pass_quiz() -> Quiz {
    quiz(
        4,
        "Half Pass Quiz",
        50.0,
        None,
        QuestionOrderType::Sequential,
        vec![
            question(
                41,
                4,
                1,
                "First question",
                vec![(411, "Right", true), (412, "Wrong", false)],
            ),
            question(
                42,
                4,
                2,
                "Second question",
                vec![(421, "Right", true), (422, "Wrong", false)],
            ),
        ],
    )
}

/// Five questions, 60% to pass, no time limit.
pub fn five_question_quiz() -> Quiz {
    let questions = (1..=5)
        .map(|i| {
            question(
                50 + i,
                5,
                i as i32,
                &format!("Question {i}"),
                vec![(500 + i * 10, "Right", true), (501 + i * 10, "Wrong", false)],
            )
        })
        .collect();
    quiz(
        5,
        "Five Question Quiz",
        60.0,
        None,
        QuestionOrderType::Sequential,
        questions,
    )
}

/// Six questions in Random order; enough permutations for shuffle variance.
pub fn random_quiz() -> Quiz {
    let questions = (1..=6)
        .map(|i| {
            question(
                60 + i,
                6,
                i as i32,
                &format!("Question {i}"),
                vec![(600 + i * 10, "Right", true)],
            )
        })
        .collect();
    quiz(
        6,
        "Random Order Quiz",
        50.0,
        None,
        QuestionOrderType::Random,
        questions,
    )
}

/// One question, 60 second time limit.
pub fn timed_quiz() -> Quiz {
    quiz(
        7,
        "Timed Quiz",
        50.0,
        Some(60),
        QuestionOrderType::Sequential,
        vec![question(
            71,
            7,
            1,
            "Only question",
            vec![(711, "Right", true), (712, "Wrong", false)],
        )],
    )
}

/// One question with no option flagged correct.
pub fn broken_quiz() -> Quiz {
    quiz(
        8,
        "Broken Quiz",
        50.0,
        None,
        QuestionOrderType::Sequential,
        vec![question(
            81,
            8,
            1,
            "No correct option here",
            vec![(811, "A", false), (812, "B", false)],
        )],
    )
}

pub fn all_fixture_quizzes() -> Vec<Quiz> {
    vec![
        science_quiz(),
        empty_quiz(),
        half_pass_quiz(),
        five_question_quiz(),
        random_quiz(),
        timed_quiz(),
        broken_quiz(),
    ]
}
