use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{AnswerRecord, PracticeSession, SessionId, SessionSummary};
use super::repository::SessionRepository;
use super::service::{PracticeService, PracticeServiceError};
use crate::catalog::{QuestionCategory, QuestionId};
use crate::critique::Critique;
use crate::error::AppError;

/// Router builder exposing the catalog, scoring, critique and session endpoints.
pub fn practice_router<R>(service: Arc<PracticeService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/questions", get(list_questions_handler::<R>))
        .route(
            "/api/v1/questions/:question_id",
            get(question_handler::<R>),
        )
        .route("/api/v1/evaluate", post(evaluate_handler::<R>))
        .route("/api/v1/critique", post(critique_handler::<R>))
        .route("/api/v1/sessions", post(start_session_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id",
            get(session_handler::<R>).delete(close_session_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/answers",
            post(submit_answer_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/answers/:question_id",
            delete(reset_answer_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/answers/:question_id/critique",
            post(session_critique_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    category: Option<String>,
}

/// Body shared by the scoring and session answer endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub question_id: QuestionId,
    pub answer: String,
}

/// Lenient body for the critique endpoint so missing fields produce envelope errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CritiqueRequest {
    question_id: Option<String>,
    answer: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionStarted {
    session_id: SessionId,
    started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    session_id: &'a SessionId,
    started_at: DateTime<Utc>,
    summary: SessionSummary,
    records: &'a [AnswerRecord],
}

impl<'a> From<&'a PracticeSession> for SessionView<'a> {
    fn from(session: &'a PracticeSession) -> Self {
        Self {
            session_id: &session.id,
            started_at: session.started_at,
            summary: session.summary(),
            records: session.records(),
        }
    }
}

fn error_response(err: PracticeServiceError) -> Response {
    AppError::from(err).into_response()
}

fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": format!("invalid request body: {}", rejection.body_text()) });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn critique_success(critique: Critique) -> Response {
    let payload = json!({ "ok": true, "feedback": critique });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn critique_failure(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "ok": false, "error": message.into() });
    (status, axum::Json(payload)).into_response()
}

fn critique_error_response(err: PracticeServiceError) -> Response {
    let err = AppError::from(err);
    critique_failure(err.status(), err.to_string())
}

pub(crate) async fn list_questions_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let catalog = service.catalog();
    match params.category.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
        None => (StatusCode::OK, axum::Json(catalog.questions())).into_response(),
        Some(raw) => match QuestionCategory::parse(raw) {
            Some(category) => {
                let questions: Vec<_> = catalog.by_category(category).collect();
                (StatusCode::OK, axum::Json(questions)).into_response()
            }
            None => {
                let payload = json!({ "error": format!("unknown question category '{raw}'") });
                (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
            }
        },
    }
}

pub(crate) async fn question_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
    Path(question_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = QuestionId(question_id);
    match service.catalog().get(&id) {
        Some(question) => (StatusCode::OK, axum::Json(question)).into_response(),
        None => error_response(PracticeServiceError::UnknownQuestion(id)),
    }
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
    body: Result<axum::Json<AnswerPayload>, JsonRejection>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let payload = match body {
        Ok(axum::Json(payload)) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.evaluate_once(&payload.question_id, &payload.answer) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn critique_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
    body: Result<axum::Json<CritiqueRequest>, JsonRejection>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let Ok(axum::Json(request)) = body else {
        return critique_failure(
            StatusCode::BAD_REQUEST,
            "malformed request: send questionId and answer as JSON",
        );
    };

    let Some(question_id) = request.question_id.filter(|id| !id.trim().is_empty()) else {
        return critique_failure(StatusCode::BAD_REQUEST, "questionId is required");
    };
    let Some(answer) = request.answer.filter(|answer| !answer.is_empty()) else {
        return critique_failure(StatusCode::BAD_REQUEST, "answer is required");
    };

    match service.critique(&QuestionId(question_id), &answer).await {
        Ok(critique) => critique_success(critique),
        Err(err) => critique_error_response(err),
    }
}

pub(crate) async fn start_session_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.start_session() {
        Ok(session) => {
            let payload = SessionStarted {
                session_id: session.id,
                started_at: session.started_at,
            };
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn session_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.session(&SessionId(session_id)) {
        Ok(session) => (StatusCode::OK, axum::Json(SessionView::from(&session))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn close_session_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.close_session(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_answer_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
    Path(session_id): Path<String>,
    body: Result<axum::Json<AnswerPayload>, JsonRejection>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let payload = match body {
        Ok(axum::Json(payload)) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    match service.submit_answer(&SessionId(session_id), &payload.question_id, &payload.answer) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reset_answer_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
    Path((session_id, question_id)): Path<(String, String)>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.reset_answer(&SessionId(session_id), &QuestionId(question_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn session_critique_handler<R>(
    State(service): State<Arc<PracticeService<R>>>,
    Path((session_id, question_id)): Path<(String, String)>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service
        .request_critique(&SessionId(session_id), &QuestionId(question_id))
        .await
    {
        Ok(critique) => critique_success(critique),
        Err(err) => critique_error_response(err),
    }
}
