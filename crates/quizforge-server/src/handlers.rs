//! HTTP handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use quizforge_core::scoring::score;
use quizforge_store::{Attempt, AttemptView, QuizRecord};

use crate::dto::{CreateQuizRequest, SubmitAttemptRequest};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// POST /api/quizzes
pub async fn create_quiz(
    State(state): State<AppState>,
    payload: Result<Json<CreateQuizRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<QuizRecord>)> {
    let Json(body) = payload?;
    let request = body.validate()?;

    let quiz = state
        .generator
        .generate(&request.topic, &request.options)
        .await;
    let record = state.store.insert_quiz(QuizRecord::new(quiz)).await?;

    tracing::info!(
        quiz_id = %record.id,
        topic = %request.topic,
        questions = record.quiz.questions.len(),
        "quiz created"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/quizzes
pub async fn list_quizzes(State(state): State<AppState>) -> ApiResult<Json<Vec<QuizRecord>>> {
    Ok(Json(state.store.list_quizzes().await?))
}

/// GET /api/quizzes/{id}
///
/// A malformed id is reported the same way as an unknown one.
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<QuizRecord>> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound("Quiz"))?;
    state
        .store
        .get_quiz(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Quiz"))
}

/// POST /api/attempts
pub async fn submit_attempt(
    State(state): State<AppState>,
    payload: Result<Json<SubmitAttemptRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AttemptView>)> {
    let Json(body) = payload?;
    let submission = body.validate()?;

    let quiz = state
        .store
        .get_quiz(submission.quiz_id)
        .await?
        .ok_or(ApiError::NotFound("Quiz"))?;

    let correct = score(&quiz.quiz, &submission.user_answers) as u32;
    let attempt = state
        .store
        .insert_attempt(Attempt::new(quiz.id, submission.user_answers, correct))
        .await?;

    tracing::info!(
        attempt_id = %attempt.id,
        quiz_id = %quiz.id,
        score = correct,
        total = quiz.quiz.questions.len(),
        "attempt scored"
    );
    Ok((
        StatusCode::CREATED,
        Json(AttemptView {
            attempt,
            quiz: Some(quiz),
        }),
    ))
}

/// GET /api/attempts
pub async fn list_attempts(State(state): State<AppState>) -> ApiResult<Json<Vec<AttemptView>>> {
    Ok(Json(state.store.list_attempt_views().await?))
}
