//! Business logic and port definitions for answerdesk.
//!
//! This crate defines the "ports" (table and cursor-store traits) that the
//! infrastructure layer implements, and the pure data-entry logic built on
//! top of them. It depends only on `answerdesk-types` -- never on
//! `answerdesk-infra` or any HTTP/database crate.

pub mod bulk;
pub mod cursor;
pub mod linker;
pub mod payload;
pub mod repository;
pub mod service;
