//! SQLite cursor store.
//!
//! Implements `CursorStore` from `answerdesk-core`. One row per session key;
//! a missing row means position 0.

use chrono::Utc;
use sqlx::Row;

use answerdesk_core::repository::cursor::CursorStore;
use answerdesk_types::error::RepositoryError;
use answerdesk_types::session::SessionKey;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `CursorStore`.
pub struct SqliteCursorStore {
    pool: DatabasePool,
}

impl SqliteCursorStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl CursorStore for SqliteCursorStore {
    async fn load(&self, session: &SessionKey) -> Result<usize, RepositoryError> {
        let row = sqlx::query("SELECT position FROM question_cursors WHERE session_key = ?")
            .bind(session.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(0);
        };
        let position: i64 = row
            .try_get("position")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        usize::try_from(position)
            .map_err(|_| RepositoryError::Query(format!("invalid cursor position {position}")))
    }

    async fn save(&self, session: &SessionKey, index: usize) -> Result<(), RepositoryError> {
        let position = i64::try_from(index)
            .map_err(|_| RepositoryError::Query(format!("cursor position {index} out of range")))?;

        sqlx::query(
            r#"INSERT INTO question_cursors (session_key, position, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT (session_key) DO UPDATE SET position = excluded.position, updated_at = excluded.updated_at"#,
        )
        .bind(session.as_str())
        .bind(position)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn reset(&self, session: &SessionKey) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM question_cursors WHERE session_key = ?")
            .bind(session.as_str())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
