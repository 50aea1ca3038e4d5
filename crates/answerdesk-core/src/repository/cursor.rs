//! Cursor store trait definition.
//!
//! Persists the position of each session in its unanswered-question queue,
//! so progress survives restarts and is kept apart per operator.

use std::future::Future;
use std::pin::Pin;

use answerdesk_types::error::RepositoryError;
use answerdesk_types::session::SessionKey;

/// Trait for cursor persistence backends (SQLite, in-memory).
pub trait CursorStore: Send + Sync {
    /// Stored index for a session; 0 for a session never seen.
    fn load(
        &self,
        session: &SessionKey,
    ) -> impl Future<Output = Result<usize, RepositoryError>> + Send;

    /// Store the index for a session, replacing any previous value.
    fn save(
        &self,
        session: &SessionKey,
        index: usize,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Forget a session so it starts again at 0.
    fn reset(
        &self,
        session: &SessionKey,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Object-safe version of [`CursorStore`] with boxed futures.
pub trait CursorStoreDyn: Send + Sync {
    fn load_boxed<'a>(
        &'a self,
        session: &'a SessionKey,
    ) -> Pin<Box<dyn Future<Output = Result<usize, RepositoryError>> + Send + 'a>>;

    fn save_boxed<'a>(
        &'a self,
        session: &'a SessionKey,
        index: usize,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>>;

    fn reset_boxed<'a>(
        &'a self,
        session: &'a SessionKey,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>>;
}

impl<T: CursorStore> CursorStoreDyn for T {
    fn load_boxed<'a>(
        &'a self,
        session: &'a SessionKey,
    ) -> Pin<Box<dyn Future<Output = Result<usize, RepositoryError>> + Send + 'a>> {
        Box::pin(self.load(session))
    }

    fn save_boxed<'a>(
        &'a self,
        session: &'a SessionKey,
        index: usize,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>> {
        Box::pin(self.save(session, index))
    }

    fn reset_boxed<'a>(
        &'a self,
        session: &'a SessionKey,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + 'a>> {
        Box::pin(self.reset(session))
    }
}

/// Type-erased cursor store for runtime backend selection.
pub struct BoxCursorStore {
    inner: Box<dyn CursorStoreDyn + Send + Sync>,
}

impl BoxCursorStore {
    pub fn new<T: CursorStore + 'static>(store: T) -> Self {
        Self {
            inner: Box::new(store),
        }
    }
}

impl CursorStore for BoxCursorStore {
    async fn load(&self, session: &SessionKey) -> Result<usize, RepositoryError> {
        self.inner.load_boxed(session).await
    }

    async fn save(&self, session: &SessionKey, index: usize) -> Result<(), RepositoryError> {
        self.inner.save_boxed(session, index).await
    }

    async fn reset(&self, session: &SessionKey) -> Result<(), RepositoryError> {
        self.inner.reset_boxed(session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore {
        positions: Mutex<HashMap<String, usize>>,
    }

    impl CursorStore for MapStore {
        async fn load(&self, session: &SessionKey) -> Result<usize, RepositoryError> {
            Ok(*self.positions.lock().unwrap().get(session.as_str()).unwrap_or(&0))
        }

        async fn save(&self, session: &SessionKey, index: usize) -> Result<(), RepositoryError> {
            self.positions
                .lock()
                .unwrap()
                .insert(session.as_str().to_string(), index);
            Ok(())
        }

        async fn reset(&self, session: &SessionKey) -> Result<(), RepositoryError> {
            self.positions.lock().unwrap().remove(session.as_str());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_box_cursor_store_delegates() {
        let store = BoxCursorStore::new(MapStore::default());
        let session: SessionKey = "desk-2".parse().unwrap();

        assert_eq!(store.load(&session).await.unwrap(), 0);
        store.save(&session, 3).await.unwrap();
        assert_eq!(store.load(&session).await.unwrap(), 3);
        store.reset(&session).await.unwrap();
        assert_eq!(store.load(&session).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_box_cursor_store_future_is_send() {
        let store = std::sync::Arc::new(BoxCursorStore::new(MapStore::default()));
        let handle = tokio::spawn({
            let store = store.clone();
            async move { store.save(&SessionKey::default(), 1).await }
        });
        handle.await.unwrap().unwrap();
        assert_eq!(store.load(&SessionKey::default()).await.unwrap(), 1);
    }
}
