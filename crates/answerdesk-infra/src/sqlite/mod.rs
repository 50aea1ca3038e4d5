//! SQLite persistence.
//!
//! - `pool`: split reader/writer pool in WAL mode, runs migrations
//! - `cursor`: per-session question cursor store

pub mod cursor;
pub mod pool;

pub use cursor::SqliteCursorStore;
pub use pool::DatabasePool;
