//! Errors raised while constructing or decoding conversation domain values.

use thiserror::Error;

/// Validation errors for conversation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversationDomainError {
    /// Participant names must contain visible characters.
    #[error("participant name cannot be empty")]
    EmptyParticipantName,

    /// Tool names must match a known record tool.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Errors decoding a participant's structured completion signal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignalParseError {
    /// The output was not a JSON object of the expected shape.
    #[error("output is not a valid completion signal: {0}")]
    Malformed(String),

    /// A handoff target was named while the task was still in progress.
    #[error("handoff target '{0}' named before the task was complete")]
    TargetWithoutCompletion(String),
}
