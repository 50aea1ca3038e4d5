//! Port definitions.
//!
//! These traits define the storage interface that the infrastructure layer
//! (answerdesk-infra) implements: the hosted tables and the cursor store.

pub mod cursor;
pub mod table;
