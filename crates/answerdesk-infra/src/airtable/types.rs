//! Airtable wire types.
//!
//! Request and response bodies of the records endpoints. Records themselves
//! deserialize straight into [`Record`].

use serde::{Deserialize, Serialize};

use answerdesk_types::record::{Fields, Record};

/// One page of `GET /v0/{base}/{table}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub records: Vec<Record>,
    /// Present while more pages remain.
    #[serde(default)]
    pub offset: Option<String>,
}

/// Body of `POST /v0/{base}/{table}`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest<'a> {
    pub fields: &'a Fields,
    pub typecast: bool,
}

/// Body of `PATCH /v0/{base}/{table}/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest<'a> {
    pub fields: &'a Fields,
}

/// Error body. Airtable sends either `{"error": "NOT_FOUND"}` or
/// `{"error": {"type": "...", "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Code(String),
    Detailed {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl ErrorDetail {
    pub fn describe(&self) -> String {
        match self {
            Self::Code(code) => code.clone(),
            Self::Detailed {
                kind,
                message: Some(message),
            } => format!("{kind}: {message}"),
            Self::Detailed { kind, message: None } => kind.clone(),
        }
    }
}
