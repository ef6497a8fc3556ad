//! Inputs and outputs of a single user turn.

use serde::{Deserialize, Serialize};

use super::{ParticipantName, Transcript};

/// One inbound user message plus the caller-held conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    /// The new message.
    pub user_message: String,
    /// Transcript before this message.
    #[serde(default)]
    pub history: Transcript,
    /// Participant that answered the previous turn. `None` starts a new
    /// registration, so the message is read as a registration code.
    #[serde(default, alias = "last_agent_name")]
    pub last_participant_name: Option<String>,
}

impl TurnRequest {
    /// Creates a request that starts a session.
    #[must_use]
    pub fn first(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            history: Transcript::new(),
            last_participant_name: None,
        }
    }

    /// Creates a request that resumes with `participant`.
    #[must_use]
    pub fn resume(
        user_message: impl Into<String>,
        history: Transcript,
        participant: impl Into<String>,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            history,
            last_participant_name: Some(participant.into()),
        }
    }

    /// Returns `true` when this message starts a registration.
    #[must_use]
    pub fn is_session_start(&self) -> bool {
        self.last_participant_name
            .as_deref()
            .is_none_or(|name| name.trim().is_empty())
    }
}

/// Classification of the reply surfaced at the end of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Text produced by a participant.
    Response,
    /// The registration code was not accepted.
    Rejection,
    /// The turn failed.
    Error,
}

/// Text surfaced to the user at the end of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Reply classification.
    pub kind: ReplyKind,
    /// User-visible text.
    pub text: String,
    /// Participant that produced the text, when one did.
    pub participant: Option<ParticipantName>,
}

/// A silent handoff that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffRecord {
    /// Participant that completed its task.
    pub from: ParticipantName,
    /// Participant that took over.
    pub to: ParticipantName,
}

/// Result of a turn: everything appended to the transcript plus the
/// participant to resume with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Entries appended during the turn, beginning with the user message.
    pub delta: Transcript,
    /// Surfaced reply.
    pub reply: Reply,
    /// Participant to resume with on the next message.
    pub next_participant: Option<ParticipantName>,
    /// Silent handoffs in the order they happened.
    pub handoffs: Vec<HandoffRecord>,
}

impl TurnOutcome {
    /// Returns `true` when the turn ended in an error reply.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.reply.kind == ReplyKind::Error
    }
}
