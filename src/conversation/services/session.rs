//! Conversation service for server-held sessions.
//!
//! Wraps the [`TurnController`] with a [`SessionStore`]: load the session,
//! run the turn, append the delta, and save. Turns on the same session are
//! serialised; the session is only written once the turn has finished, so a
//! turn dropped mid-flight leaves the stored transcript untouched.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mockable::Clock;
use tracing::info;

use crate::conversation::domain::{SessionId, SessionState, TurnOutcome, TurnRequest};
use crate::conversation::error::ConversationError;
use crate::conversation::ports::invoker::ParticipantInvoker;
use crate::conversation::ports::registry::ParticipantRegistry;
use crate::conversation::ports::session_store::{SessionStore, SessionStoreError};

use super::turn::TurnController;

/// Opening message of every server-held session.
pub const GREETING: &str =
    "Hello! I'm the Urmston Town Registration Assistant. How can I help you today?";

type SessionLocks = Mutex<HashMap<SessionId, Arc<tokio::sync::Mutex<()>>>>;

/// Session-backed front end to the turn controller.
pub struct ConversationService<S, R, I, K>
where
    S: SessionStore,
    R: ParticipantRegistry,
    I: ParticipantInvoker,
    K: Clock + Send + Sync,
{
    store: Arc<S>,
    controller: Arc<TurnController<R, I>>,
    clock: Arc<K>,
    locks: Arc<SessionLocks>,
}

impl<S, R, I, K> Clone for ConversationService<S, R, I, K>
where
    S: SessionStore,
    R: ParticipantRegistry,
    I: ParticipantInvoker,
    K: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            controller: Arc::clone(&self.controller),
            clock: Arc::clone(&self.clock),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<S, R, I, K> ConversationService<S, R, I, K>
where
    S: SessionStore,
    R: ParticipantRegistry,
    I: ParticipantInvoker,
    K: Clock + Send + Sync,
{
    /// Creates a conversation service.
    #[must_use]
    pub fn new(store: Arc<S>, controller: Arc<TurnController<R, I>>, clock: Arc<K>) -> Self {
        Self {
            store,
            controller,
            clock,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the underlying turn controller.
    #[must_use]
    pub fn controller(&self) -> &TurnController<R, I> {
        &self.controller
    }

    /// Starts a session whose transcript opens with [`GREETING`].
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::Store`] if the session cannot be stored.
    pub async fn create_session(&self) -> Result<SessionState, ConversationError> {
        let session = SessionState::new(&*self.clock).with_greeting(GREETING);
        self.store.create(&session).await?;
        info!(session_id = %session.id, "session created");
        Ok(session)
    }

    /// Loads a session.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::SessionNotFound`] for an unknown ID.
    pub async fn session(&self, id: SessionId) -> Result<SessionState, ConversationError> {
        self.store
            .find(id)
            .await?
            .ok_or(ConversationError::SessionNotFound(id))
    }

    /// Runs a turn on a stored session and saves the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::SessionNotFound`] for an unknown ID, or
    /// [`ConversationError::Store`] if the session cannot be loaded or saved.
    /// Turn failures are not errors here; they come back as an error reply in
    /// the outcome.
    pub async fn send_message(
        &self,
        id: SessionId,
        user_message: &str,
    ) -> Result<TurnOutcome, ConversationError> {
        self.session(id).await?;
        let lease = self.lease_lock(id)?;
        let _guard = lease.lock.lock().await;

        let mut session = self.session(id).await?;
        let request = TurnRequest {
            user_message: user_message.to_owned(),
            history: session.transcript.clone(),
            last_participant_name: session
                .next_participant
                .as_ref()
                .map(|name| name.as_str().to_owned()),
        };

        let outcome = self.controller.run_turn(&request).await;
        session.apply_outcome(&outcome, &*self.clock);
        self.store.save(&session).await?;
        Ok(outcome)
    }

    fn lease_lock(&self, id: SessionId) -> Result<LockLease<'_>, ConversationError> {
        let mut locks = self.locks.lock().map_err(|err| {
            SessionStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let lock = Arc::clone(locks.entry(id).or_default());
        Ok(LockLease {
            locks: &self.locks,
            id,
            lock,
        })
    }

    #[cfg(test)]
    pub(crate) fn tracked_sessions(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }
}

/// Holds a session's turn lock and drops its map entry once no other turn
/// is waiting on it.
struct LockLease<'a> {
    locks: &'a SessionLocks,
    id: SessionId,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for LockLease<'_> {
    fn drop(&mut self) {
        if let Ok(mut locks) = self.locks.lock() {
            // The map and this lease hold the only references.
            if Arc::strong_count(&self.lock) == 2 {
                locks.remove(&self.id);
            }
        }
    }
}
