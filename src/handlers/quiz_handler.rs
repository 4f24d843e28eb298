use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState, errors::AppError, models::dto::request::SubmitAnswerRequest,
};

/// Lists every quiz with its summary stats.
#[get("/api/quiz")]
pub async fn list_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes().await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

/// Starts a new attempt for the quiz and returns the ordered question list.
/// The start timestamp is taken from the server clock; nothing time-related
/// is accepted from the client.
#[post("/api/quiz/{quiz_id}/start")]
pub async fn start_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = state.attempt_service.start_quiz(quiz_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Records the answer for one question and returns correctness feedback.
#[post("/api/quiz/submit-answer")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let feedback = state.attempt_service.submit_answer(&request).await?;
    Ok(HttpResponse::Ok().json(feedback))
}

/// Closes the attempt and returns the scored result with the review sheet.
#[post("/api/quiz/{attempt_id}/finish")]
pub async fn finish_quiz(
    state: web::Data<AppState>,
    attempt_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .attempt_service
        .finish_quiz(attempt_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/api/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
