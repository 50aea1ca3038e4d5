//! Observability setup for answerdesk: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;

pub use tracing_setup::{LogFormat, TracingOptions, default_filter, init_tracing, shutdown_tracing};
