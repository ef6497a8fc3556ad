//! Errors surfaced by the turn controller and conversation service.
//!
//! Every [`TurnError`] ends a turn with exactly one user-visible message; see
//! [`TurnError::user_message`].

use thiserror::Error;

use super::domain::{ParticipantName, SessionId, SignalParseError};
use super::ports::invoker::InvocationError;
use super::ports::session_store::SessionStoreError;
use super::services::InstructionError;
use crate::registration::validator::RejectedCode;

/// Failures that terminate a turn.
#[derive(Debug, Clone, Error)]
pub enum TurnError {
    /// The first message of a session was not a valid registration code.
    #[error("invalid registration code '{}': {}", .0.raw_code(), .0.reason())]
    InvalidCode(RejectedCode),

    /// The participant to run is not registered.
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    /// Instructions could not be rendered.
    #[error("instructions for '{participant}' could not be rendered: {source}")]
    Instructions {
        /// Participant whose template failed.
        participant: ParticipantName,
        /// Render failure.
        #[source]
        source: InstructionError,
    },

    /// A structured participant produced output that is not a completion signal.
    #[error("output from '{participant}' could not be parsed: {source}")]
    OutputParse {
        /// Participant that produced the output.
        participant: ParticipantName,
        /// Decode failure.
        #[source]
        source: SignalParseError,
    },

    /// Silent handoffs exceeded the configured bound.
    #[error("handoff chain exceeded {limit} silent handoffs")]
    HandoffChainOverflow {
        /// Configured maximum.
        limit: usize,
    },

    /// The hosted language model failed.
    #[error("invocation of '{participant}' failed: {source}")]
    Upstream {
        /// Participant being run.
        participant: ParticipantName,
        /// Classified upstream failure.
        #[source]
        source: InvocationError,
    },
}

impl TurnError {
    /// Returns `true` when the conversation can resume with the participant
    /// the failed turn started with.
    ///
    /// An invalid code or an unknown participant forces a restart from a
    /// registration code.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidCode(_) | Self::UnknownParticipant(_))
    }

    /// Returns the text shown to the user when this error ends a turn.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCode(rejected) => format!(
                "Sorry, `{}` is not a valid registration code. {} Please check the code \
                 you were given and send it again.",
                rejected.raw_code().trim(),
                rejected.reason()
            ),
            Self::UnknownParticipant(_) => {
                "System error: the assistant handling your registration is unavailable. \
                 Please start again with your registration code."
                    .to_owned()
            }
            Self::Instructions { .. } | Self::OutputParse { .. } => {
                "Sorry, something went wrong while processing that reply. Please try again."
                    .to_owned()
            }
            Self::HandoffChainOverflow { .. } => {
                "Sorry, your registration could not be completed automatically. \
                 Please contact the club."
                    .to_owned()
            }
            Self::Upstream { source, .. } if source.is_transient() => {
                "The registration assistant is busy right now. Please try again in a moment."
                    .to_owned()
            }
            Self::Upstream { .. } => {
                "Sorry, the registration assistant is unavailable. Please try again later."
                    .to_owned()
            }
        }
    }
}

/// Failures of the session-backed conversation service.
#[derive(Debug, Clone, Error)]
pub enum ConversationError {
    /// No session has this ID.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The session store failed.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}
