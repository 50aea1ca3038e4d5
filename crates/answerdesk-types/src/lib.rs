//! Shared domain types for answerdesk.
//!
//! This crate contains the records exchanged with the hosted question base
//! (Question, Company, Robot, Feedback), the request/view shapes of the
//! data-entry flows, configuration types, and their error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod question;
pub mod record;
pub mod session;
pub mod view;
