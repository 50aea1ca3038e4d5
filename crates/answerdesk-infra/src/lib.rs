//! Infrastructure implementations for answerdesk.
//!
//! Concrete adapters for the ports defined in `answerdesk-core`: the Airtable
//! REST client, SQLite cursor persistence, and in-memory stand-ins used by
//! `--demo` and tests.

pub mod airtable;
pub mod config;
pub mod credentials;
pub mod memory;
pub mod sqlite;
