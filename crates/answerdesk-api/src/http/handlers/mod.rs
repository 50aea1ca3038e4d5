//! HTTP request handlers for the REST API.

pub mod company;
pub mod feedback;
pub mod session;
pub mod status;

use answerdesk_types::session::SessionKey;

use crate::http::error::AppError;

/// Parse a session key path segment, returning a 400 error when invalid.
pub(crate) fn parse_session(raw: &str) -> Result<SessionKey, AppError> {
    raw.parse::<SessionKey>()
        .map_err(|e| AppError::Validation(e.to_string()))
}
