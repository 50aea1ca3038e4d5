//! Raw records as returned by the hosted table store.
//!
//! A record is an opaque id plus a JSON object of fields. Typed views
//! (`Question`, `Company`, ...) are built on top in [`crate::question`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use std::fmt;

/// Field map of a record, keyed by the table's column names.
pub type Fields = serde_json::Map<String, Value>;

/// Identifier of a record in the hosted store (e.g. `recA1b2C3d4E5f6G7`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A `{id, fields}` pair from the remote table store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub fields: Fields,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
            created_time: None,
        }
    }

    /// Text value of a field.
    ///
    /// Missing fields and non-string values yield `None`. Lookup-style fields
    /// that arrive as a one-element array of strings are unwrapped.
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field)? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) => items.first().and_then(Value::as_str),
            _ => None,
        }
    }

    /// Text value of a field, or the empty string.
    pub fn text_or_empty(&self, field: &str) -> &str {
        self.text(field).unwrap_or("")
    }

    /// All record ids held by a link field.
    ///
    /// Link fields carry a list of ids; a bare string is accepted as a
    /// single link.
    pub fn links(&self, field: &str) -> Vec<RecordId> {
        match self.fields.get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(RecordId::from)
                .collect(),
            Some(Value::String(s)) if !s.is_empty() => vec![RecordId::from(s.as_str())],
            _ => Vec::new(),
        }
    }
}

/// Build the JSON value of a link field: a one-element list of ids.
pub fn link_value(id: &RecordId) -> Value {
    Value::Array(vec![Value::String(id.0.clone())])
}
