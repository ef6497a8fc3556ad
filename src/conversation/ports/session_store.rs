//! Port for persisting server-held sessions.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::conversation::domain::{SessionId, SessionState};

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Storage for [`SessionState`] records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a new session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Duplicate`] if the ID is already stored.
    async fn create(&self, session: &SessionState) -> SessionStoreResult<()>;

    /// Loads a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] if the lookup fails.
    async fn find(&self, id: SessionId) -> SessionStoreResult<Option<SessionState>>;

    /// Replaces a stored session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::NotFound`] if the session does not exist.
    async fn save(&self, session: &SessionState) -> SessionStoreResult<()>;
}

/// Errors from session storage.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// The session does not exist.
    #[error("session not found: {0}")]
    NotFound(SessionId),

    /// A session with this ID already exists.
    #[error("session already exists: {0}")]
    Duplicate(SessionId),

    /// Storage failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Creates a persistence error from any error type.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
