//! In-memory implementation of the `SessionStore` port.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::conversation::domain::{SessionId, SessionState};
use crate::conversation::ports::session_store::{
    SessionStore, SessionStoreError, SessionStoreResult,
};

/// In-memory implementation of [`SessionStore`].
///
/// Thread-safe via internal [`RwLock`]. Sessions are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionState>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if no sessions are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(err: impl std::fmt::Display) -> SessionStoreError {
    SessionStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: &SessionState) -> SessionStoreResult<()> {
        let mut guard = self.sessions.write().map_err(lock_error)?;
        if guard.contains_key(&session.id) {
            return Err(SessionStoreError::Duplicate(session.id));
        }
        guard.insert(session.id, session.clone());
        Ok(())
    }

    async fn find(&self, id: SessionId) -> SessionStoreResult<Option<SessionState>> {
        let guard = self.sessions.read().map_err(lock_error)?;
        Ok(guard.get(&id).cloned())
    }

    async fn save(&self, session: &SessionState) -> SessionStoreResult<()> {
        let mut guard = self.sessions.write().map_err(lock_error)?;
        let stored = guard
            .get_mut(&session.id)
            .ok_or(SessionStoreError::NotFound(session.id))?;
        *stored = session.clone();
        Ok(())
    }
}
