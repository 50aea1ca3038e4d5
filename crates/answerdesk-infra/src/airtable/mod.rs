//! Airtable REST adapter.
//!
//! [`AirtableClient`] holds the HTTP client and credentials for one base;
//! [`AirtableTable`] binds it to a table name and implements
//! [`RecordTable`](answerdesk_core::repository::table::RecordTable).

pub mod client;
pub mod types;

pub use client::{AirtableClient, AirtableTable};
