//! Server-held session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ParticipantName, SessionId, Transcript, TranscriptEntry, TurnOutcome};

/// Everything persisted between the turns of one server-held session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Session identifier.
    pub id: SessionId,
    /// Full transcript so far.
    pub transcript: Transcript,
    /// Participant that resumes on the next message.
    pub next_participant: Option<ParticipantName>,
    /// Number of completed turns.
    pub turn_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last applied turn.
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    /// Creates an empty session.
    #[must_use]
    pub fn new(clock: &impl mockable::Clock) -> Self {
        let now = clock.utc();
        Self {
            id: SessionId::new(),
            transcript: Transcript::new(),
            next_participant: None,
            turn_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Opens the transcript with an assistant greeting.
    #[must_use]
    pub fn with_greeting(mut self, greeting: &str) -> Self {
        self.transcript.push(TranscriptEntry::assistant(greeting));
        self
    }

    /// Appends a turn's delta and records who resumes next.
    pub fn apply_outcome(&mut self, outcome: &TurnOutcome, clock: &impl mockable::Clock) {
        self.transcript.extend_from(&outcome.delta);
        self.next_participant.clone_from(&outcome.next_participant);
        self.turn_count = self.turn_count.saturating_add(1);
        self.updated_at = clock.utc();
    }
}
