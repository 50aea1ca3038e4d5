//! Feedback HTTP handler.
//!
//! POST /api/v1/feedback - File a feedback message.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use answerdesk_types::record::RecordId;
use answerdesk_types::view::FeedbackRequest;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, elapsed_ms, request_id};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FeedbackCreated {
    pub id: RecordId,
}

/// POST /api/v1/feedback
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FeedbackCreated>>), AppError> {
    let start = Instant::now();

    let id = state.answer_service.submit_feedback(request).await?;

    let resp = ApiResponse::success(FeedbackCreated { id }, request_id(), elapsed_ms(start));
    Ok((StatusCode::CREATED, Json(resp)))
}
