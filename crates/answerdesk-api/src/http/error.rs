//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use answerdesk_types::error::AnswerError;

use crate::http::response::{ApiErrorDetail, ApiResponse, request_id};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the data-entry flows.
    Answer(AnswerError),
    /// Malformed request input (path segments, bodies).
    Validation(String),
}

impl From<AnswerError> for AppError {
    fn from(e: AnswerError) -> Self {
        AppError::Answer(e)
    }
}

impl AppError {
    /// Status, machine-readable code and optional details for this error.
    fn classify(&self) -> (StatusCode, &'static str, Option<serde_json::Value>) {
        match self {
            AppError::Answer(AnswerError::Fetch(_)) => (StatusCode::BAD_GATEWAY, "FETCH_FAILED", None),
            AppError::Answer(AnswerError::Write(_)) => (StatusCode::BAD_GATEWAY, "WRITE_FAILED", None),
            AppError::Answer(AnswerError::PartialSave { saved, failed_id, .. }) => (
                StatusCode::BAD_GATEWAY,
                "WRITE_FAILED",
                Some(json!({ "saved": saved, "failed_id": failed_id })),
            ),
            AppError::Answer(AnswerError::NothingToDo) => (StatusCode::CONFLICT, "NOTHING_TO_DO", None),
            AppError::Answer(AnswerError::StaleQuestion { submitted, current }) => (
                StatusCode::CONFLICT,
                "STALE_QUESTION",
                Some(json!({ "submitted": submitted, "current": current })),
            ),
            AppError::Answer(AnswerError::Validation(_)) | AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None)
            }
            AppError::Answer(AnswerError::UnknownCompany(_)) => {
                (StatusCode::NOT_FOUND, "COMPANY_NOT_FOUND", None)
            }
            AppError::Answer(AnswerError::Cursor(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CURSOR_ERROR", None)
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Answer(e) => e.to_string(),
            AppError::Validation(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, details) = self.classify();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(code, %message, "request rejected");
        }

        let body = ApiResponse::failure(
            ApiErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
            request_id(),
        );

        (status, Json(body)).into_response()
    }
}
