//! Use cases.
//!
//! Services orchestrate table and cursor-store calls around the pure logic
//! in `linker`, `cursor`, `payload` and `bulk`. They depend on the port
//! traits -- never on concrete infrastructure implementations.

pub mod answer;
