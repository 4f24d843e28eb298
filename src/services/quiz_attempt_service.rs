use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rand::seq::SliceRandom;

use crate::{
    errors::{AppError, AppResult},
    models::domain::quiz::QuestionOrderType,
    models::domain::{AttemptAnswer, Question, QuizAttempt},
    models::dto::request::SubmitAnswerRequest,
    models::dto::response::{
        AnswerFeedbackDto, QuestionDto, QuizResultDto, QuizStartResponseDto, ReviewQuestionDto,
    },
    repositories::{AnswerRepository, AttemptRepository, QuizRepository},
};

/// Allowance when comparing elapsed time against the quiz time limit, to
/// absorb clock noise and rounding at the boundary.
const TIME_LIMIT_GRACE_SECONDS: f64 = 1.0;

/// Review-sheet sentinel for questions the user never answered (or answered
/// with no option selected).
const NO_ANSWER_TEXT: &str = "No answer";

/// The attempt lifecycle engine: starts attempts, records answers with
/// immediate feedback, and finalizes attempts into a pass/fail verdict.
/// Each public method is a self-contained unit of work against storage;
/// no state is held between calls.
pub struct QuizAttemptService {
    quiz_repository: Arc<dyn QuizRepository>,
    attempt_repository: Arc<dyn AttemptRepository>,
    answer_repository: Arc<dyn AnswerRepository>,
}

impl QuizAttemptService {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        attempt_repository: Arc<dyn AttemptRepository>,
        answer_repository: Arc<dyn AnswerRepository>,
    ) -> Self {
        Self {
            quiz_repository,
            attempt_repository,
            answer_repository,
        }
    }

    /// Starts a new attempt: stamps the server clock, persists the attempt to
    /// obtain its id, and returns the quiz questions in presentation order
    /// with correctness flags stripped.
    pub async fn start_quiz(&self, quiz_id: i64) -> AppResult<QuizStartResponseDto> {
        if quiz_id <= 0 {
            return Err(AppError::InvalidRequest(
                "QuizId must be a positive integer.".to_string(),
            ));
        }

        let quiz = self
            .quiz_repository
            .find_with_questions(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with ID {quiz_id} not found.")))?;

        if quiz.questions.is_empty() {
            return Err(AppError::InvalidRequest("Quiz has no questions.".to_string()));
        }

        // All validation has passed; the insert is the only write of this
        // operation, so a failure after this point cannot leave partial state.
        let attempt = self
            .attempt_repository
            .insert(QuizAttempt::start(quiz_id))
            .await?;

        let questions = Self::order_questions(quiz.questions, quiz.question_order_type);

        Ok(QuizStartResponseDto {
            attempt_id: attempt.id,
            quiz_name: quiz.name,
            time_limit_seconds: quiz.time_limit_seconds,
            questions: questions.iter().map(QuestionDto::from).collect(),
        })
    }

    /// Records (or re-records) the answer for one question of an attempt and
    /// returns immediate correctness feedback. Resubmission for the same
    /// `(attempt_id, question_id)` overwrites the stored answer in place.
    pub async fn submit_answer(
        &self,
        request: &SubmitAnswerRequest,
    ) -> AppResult<AnswerFeedbackDto> {
        if request.attempt_id <= 0 {
            return Err(AppError::InvalidRequest(
                "AttemptId must be a positive integer.".to_string(),
            ));
        }
        if request.question_id <= 0 {
            return Err(AppError::InvalidRequest(
                "QuestionId must be a positive integer.".to_string(),
            ));
        }

        let attempt = self
            .attempt_repository
            .find_by_id(request.attempt_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Quiz attempt with ID {} not found.",
                    request.attempt_id
                ))
            })?;

        let question = self
            .quiz_repository
            .find_question_with_options(request.question_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Question with ID {} not found.",
                    request.question_id
                ))
            })?;

        // Cross-quiz submission guard
        if question.quiz_id != attempt.quiz_id {
            return Err(AppError::InvalidRequest(format!(
                "Question ID {} does not belong to the quiz in attempt ID {}.",
                request.question_id, request.attempt_id
            )));
        }

        if let Some(selected_id) = request.selected_option_id {
            if question.option(selected_id).is_none() {
                return Err(AppError::InvalidRequest(format!(
                    "Selected option with ID {selected_id} not found for this question."
                )));
            }
        }

        let is_correct = Self::evaluate_answer(&question, request.selected_option_id);

        let answer = AttemptAnswer {
            attempt_id: request.attempt_id,
            question_id: request.question_id,
            selected_option_id: request.selected_option_id,
            is_correct,
        };
        self.answer_repository.upsert(&answer).await?;

        let correct_option = question.correct_option();
        Ok(AnswerFeedbackDto {
            is_correct,
            correct_option_id: correct_option.map(|o| o.id),
            correct_option_text: correct_option.map(|o| o.text.clone()),
        })
    }

    /// Closes an attempt: stamps the server end time, scores the attempt over
    /// every question of the quiz (unanswered counts as incorrect), applies
    /// the score-and-time pass rule, persists the verdict, and builds the
    /// always-sequential review sheet. A finished attempt cannot be finished
    /// again.
    pub async fn finish_quiz(&self, attempt_id: i64) -> AppResult<QuizResultDto> {
        if attempt_id <= 0 {
            return Err(AppError::InvalidRequest(
                "AttemptId must be a positive integer.".to_string(),
            ));
        }

        let mut attempt = self
            .attempt_repository
            .find_by_id(attempt_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz attempt with ID {attempt_id} not found."))
            })?;

        if attempt.is_finished() {
            return Err(AppError::BusinessRuleViolation(format!(
                "Quiz attempt with ID {attempt_id} is already finished."
            )));
        }

        let quiz = self
            .quiz_repository
            .find_with_questions(attempt.quiz_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with ID {} not found.", attempt.quiz_id))
            })?;

        let answers = self.answer_repository.find_by_attempt(attempt_id).await?;

        let end_time = Utc::now();
        let total_time_taken_seconds =
            (end_time - attempt.start_time).num_milliseconds() as f64 / 1000.0;

        let total_questions = quiz.question_count() as i32;
        let correct_answers_count = answers.iter().filter(|a| a.is_correct).count() as i32;
        // Unanswered questions count as incorrect: an unanswered question
        // cannot be correct.
        let incorrect_answers_count = total_questions - correct_answers_count;

        let is_score_passed =
            Self::score_percentage(correct_answers_count, total_questions) >= quiz.pass_percentage;
        let is_time_passed =
            Self::is_within_time_limit(total_time_taken_seconds, quiz.time_limit_seconds);
        let is_passed = is_score_passed && is_time_passed;

        attempt.end_time = Some(end_time);
        attempt.score = Some(correct_answers_count);
        attempt.is_passed = Some(is_passed);
        self.attempt_repository.save(&attempt).await?;

        // Review is always in authored order, regardless of how the questions
        // were presented during the attempt.
        let questions = self.quiz_repository.questions_in_order(attempt.quiz_id).await?;
        let review_questions = Self::build_review(&questions, &answers);

        Ok(QuizResultDto {
            total_time_taken_seconds,
            correct_answers_count,
            incorrect_answers_count,
            is_passed,
            pass_percentage_required: quiz.pass_percentage,
            time_limit_seconds: quiz.time_limit_seconds,
            review_questions,
        })
    }

    /// Presentation order: a fresh uniform shuffle for Random (never
    /// persisted, never reproducible), a stable ascending sort by
    /// `order_in_quiz` for Sequential.
    fn order_questions(
        mut questions: Vec<Question>,
        order_type: QuestionOrderType,
    ) -> Vec<Question> {
        match order_type {
            QuestionOrderType::Random => questions.shuffle(&mut rand::thread_rng()),
            QuestionOrderType::Sequential => questions.sort_by_key(|q| q.order_in_quiz),
        }
        questions
    }

    /// An answer is correct only if an option was selected, the question
    /// defines a correct option, and the two match. Skipping is always
    /// incorrect.
    fn evaluate_answer(question: &Question, selected_option_id: Option<i64>) -> bool {
        match (selected_option_id, question.correct_option()) {
            (Some(selected), Some(correct)) => selected == correct.id,
            _ => false,
        }
    }

    fn score_percentage(correct_count: i32, total_questions: i32) -> f64 {
        if total_questions > 0 {
            f64::from(correct_count) / f64::from(total_questions) * 100.0
        } else {
            0.0
        }
    }

    fn is_within_time_limit(elapsed_seconds: f64, time_limit_seconds: Option<i64>) -> bool {
        match time_limit_seconds {
            Some(limit) => elapsed_seconds - limit as f64 <= TIME_LIMIT_GRACE_SECONDS,
            None => true,
        }
    }

    fn build_review(
        questions: &[Question],
        answers: &[AttemptAnswer],
    ) -> Vec<ReviewQuestionDto> {
        let answers_by_question: HashMap<i64, &AttemptAnswer> =
            answers.iter().map(|a| (a.question_id, a)).collect();

        questions
            .iter()
            .map(|question| {
                let answer = answers_by_question.get(&question.id);

                let your_answer_text = answer
                    .and_then(|a| a.selected_option_id)
                    .and_then(|id| question.option(id))
                    .map(|o| o.text.clone())
                    .unwrap_or_else(|| NO_ANSWER_TEXT.to_string());

                ReviewQuestionDto {
                    question_id: question.id,
                    text: question.text.clone(),
                    your_answer_text,
                    correct_answer_text: question.correct_option().map(|o| o.text.clone()),
                    was_correct: answer.map(|a| a.is_correct).unwrap_or(false),
                }
            })
            .collect()
    }
}
