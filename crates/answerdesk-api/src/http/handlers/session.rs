//! One-question form HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/v1/sessions/{session}/current - Current question with dropdown options
//! - POST /api/v1/sessions/{session}/skip    - Skip without writing
//! - POST /api/v1/sessions/{session}/save    - Save the answer, then advance
//! - POST /api/v1/sessions/{session}/reset   - Back to the first unanswered question

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};

use answerdesk_types::view::{CurrentView, SaveOutcome, SaveRequest};

use super::parse_session;
use crate::http::error::AppError;
use crate::http::response::{ApiResponse, elapsed_ms, request_id};
use crate::state::AppState;

/// GET /api/v1/sessions/{session}/current
pub async fn current(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<ApiResponse<CurrentView>>, AppError> {
    let start = Instant::now();
    let session = parse_session(&session)?;

    let view = state.answer_service.current(&session).await?;

    Ok(Json(with_session_links(
        ApiResponse::success(view, request_id(), elapsed_ms(start)),
        &session.to_string(),
    )))
}

/// POST /api/v1/sessions/{session}/skip
pub async fn skip(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<ApiResponse<CurrentView>>, AppError> {
    let start = Instant::now();
    let session = parse_session(&session)?;

    let view = state.answer_service.skip(&session).await?;

    Ok(Json(with_session_links(
        ApiResponse::success(view, request_id(), elapsed_ms(start)),
        &session.to_string(),
    )))
}

/// POST /api/v1/sessions/{session}/save
pub async fn save(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<ApiResponse<SaveOutcome>>, AppError> {
    let start = Instant::now();
    let session = parse_session(&session)?;

    let outcome = state.answer_service.save(&session, request).await?;

    Ok(Json(with_session_links(
        ApiResponse::success(outcome, request_id(), elapsed_ms(start)),
        &session.to_string(),
    )))
}

/// POST /api/v1/sessions/{session}/reset
pub async fn reset(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<ApiResponse<CurrentView>>, AppError> {
    let start = Instant::now();
    let session = parse_session(&session)?;

    let view = state.answer_service.reset(&session).await?;

    Ok(Json(with_session_links(
        ApiResponse::success(view, request_id(), elapsed_ms(start)),
        &session.to_string(),
    )))
}

fn with_session_links<T: serde::Serialize>(resp: ApiResponse<T>, session: &str) -> ApiResponse<T> {
    let base = format!("/api/v1/sessions/{session}");
    resp.with_link("self", &format!("{base}/current"))
        .with_link("skip", &format!("{base}/skip"))
        .with_link("save", &format!("{base}/save"))
        .with_link("reset", &format!("{base}/reset"))
}
