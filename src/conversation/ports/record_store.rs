//! Port for the tabular player-record store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for record store operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

/// Identifier assigned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields written when a player record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayerRecord {
    /// First word of the full name.
    pub first_name: String,
    /// Remaining words of the full name, possibly empty.
    pub last_name: String,
    /// Full name as given.
    pub full_name: String,
}

/// Player record storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates a player record and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError`] if the store rejects the record.
    async fn create_player(&self, record: &NewPlayerRecord) -> RecordStoreResult<RecordId>;

    /// Sets the contact email of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::NotFound`] for an unknown record.
    async fn update_email(&self, record_id: &RecordId, email: &str) -> RecordStoreResult<()>;
}

/// Errors from the record store.
#[derive(Debug, Clone, Error)]
pub enum RecordStoreError {
    /// No record has this ID.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// The store refused the request.
    #[error("record store rejected the request: {0}")]
    Rejected(String),

    /// Transport or storage failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RecordStoreError {
    /// Creates a persistence error from any error type.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
