use thiserror::Error;

use crate::record::RecordId;

/// Errors from the remote table store.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("remote store rejected the access token")]
    Unauthorized,

    #[error("table or record not found: {0}")]
    NotFound(String),

    #[error("remote store rate limit reached")]
    RateLimited,

    #[error("remote store returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Deserialization(String),

    #[error("table client misconfigured: {0}")]
    Configuration(String),
}

/// Errors from cursor-store operations (used by trait definitions in answerdesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),
}

/// Rejected session key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionKeyError {
    #[error("session key cannot be empty")]
    Empty,

    #[error("session key must be at most {max} characters")]
    TooLong { max: usize },

    #[error("invalid session key '{0}': use letters, digits, '-', '_' or '.'")]
    InvalidCharacters(String),
}

/// Errors surfaced by the data-entry flows.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// A list call failed; nothing is rendered for this interaction.
    #[error("failed to fetch records: {0}")]
    Fetch(#[source] TableError),

    /// A create or update call failed; the cursor was not advanced.
    #[error("failed to write record: {0}")]
    Write(#[source] TableError),

    #[error("saved {saved} answer(s) before failing on question {failed_id}: {source}")]
    PartialSave {
        saved: usize,
        failed_id: RecordId,
        #[source]
        source: TableError,
    },

    #[error("no unanswered question left for this session")]
    NothingToDo,

    #[error("question '{submitted}' is no longer current (current: '{current}')")]
    StaleQuestion { submitted: RecordId, current: RecordId },

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("company '{0}' not found")]
    UnknownCompany(RecordId),

    #[error("cursor store error: {0}")]
    Cursor(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_error_display() {
        let err = TableError::Http {
            status: 422,
            message: "INVALID_VALUE_FOR_COLUMN".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "remote store returned HTTP 422: INVALID_VALUE_FOR_COLUMN"
        );
    }

    #[test]
    fn test_partial_save_display() {
        let err = AnswerError::PartialSave {
            saved: 2,
            failed_id: RecordId::from("q3"),
            source: TableError::RateLimited,
        };
        let msg = err.to_string();
        assert!(msg.contains("saved 2"));
        assert!(msg.contains("q3"));
    }

    #[test]
    fn test_cursor_error_converts() {
        let err: AnswerError = RepositoryError::Query("locked".to_string()).into();
        assert!(matches!(err, AnswerError::Cursor(_)));
    }
}
