//! In-memory implementation of the `RecordStore` port.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::conversation::ports::record_store::{
    NewPlayerRecord, RecordId, RecordStore, RecordStoreError, RecordStoreResult,
};

/// A stored player record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPlayer {
    /// Fields written at creation.
    pub record: NewPlayerRecord,
    /// Contact email, once set.
    pub player_email: Option<String>,
}

#[derive(Debug, Default)]
struct Records {
    next_id: u64,
    players: BTreeMap<RecordId, StoredPlayer>,
}

/// In-memory implementation of [`RecordStore`].
///
/// Assigns sequential `rec`-prefixed IDs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<Records>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a stored record.
    #[must_use]
    pub fn get(&self, record_id: &RecordId) -> Option<StoredPlayer> {
        self.records
            .read()
            .ok()
            .and_then(|guard| guard.players.get(record_id).cloned())
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .read()
            .map(|guard| guard.players.len())
            .unwrap_or(0)
    }

    /// Returns `true` if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(err: impl std::fmt::Display) -> RecordStoreError {
    RecordStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create_player(&self, record: &NewPlayerRecord) -> RecordStoreResult<RecordId> {
        let mut guard = self.records.write().map_err(lock_error)?;
        guard.next_id = guard.next_id.saturating_add(1);
        let record_id = RecordId::new(format!("rec{:06}", guard.next_id));
        guard.players.insert(
            record_id.clone(),
            StoredPlayer {
                record: record.clone(),
                player_email: None,
            },
        );
        Ok(record_id)
    }

    async fn update_email(&self, record_id: &RecordId, email: &str) -> RecordStoreResult<()> {
        let mut guard = self.records.write().map_err(lock_error)?;
        let stored = guard
            .players
            .get_mut(record_id)
            .ok_or_else(|| RecordStoreError::NotFound(record_id.clone()))?;
        stored.player_email = Some(email.to_owned());
        Ok(())
    }
}
