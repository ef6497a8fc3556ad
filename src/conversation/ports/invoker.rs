//! Port for running a participant against the hosted language model.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::conversation::domain::{ParticipantDefinition, TranscriptEntry};

/// Result type for participant invocations.
pub type InvocationResult<T> = Result<T, InvocationError>;

/// Everything needed to run one participant once.
#[derive(Debug, Clone, Copy)]
pub struct InvocationRequest<'a> {
    /// The participant being run.
    pub participant: &'a ParticipantDefinition,
    /// Instructions rendered for this invocation.
    pub instructions: &'a str,
    /// Transcript the participant sees.
    pub input: &'a [TranscriptEntry],
}

impl<'a> InvocationRequest<'a> {
    /// Creates invocation parameters.
    #[must_use]
    pub const fn new(
        participant: &'a ParticipantDefinition,
        instructions: &'a str,
        input: &'a [TranscriptEntry],
    ) -> Self {
        Self {
            participant,
            instructions,
            input,
        }
    }
}

/// Runs a participant and returns its complete raw output.
///
/// Implementations execute any tool calls the participant makes before
/// returning; the returned text is the participant's final message.
#[async_trait]
pub trait ParticipantInvoker: Send + Sync {
    /// Runs the participant once.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] when the upstream service fails or the
    /// participant does not produce a final message.
    async fn invoke(&self, request: InvocationRequest<'_>) -> InvocationResult<String>;
}

/// Classified failures from the hosted language model.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    /// Timeouts and connection failures.
    #[error("network error: {0}")]
    Network(String),

    /// The service throttled the request.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Upstream message.
        message: String,
        /// Suggested delay before retrying.
        retry_after: Option<Duration>,
    },

    /// The service returned a 5xx status.
    #[error("upstream server error: {0}")]
    Server(String),

    /// Credentials were rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request was rejected as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The participant kept calling tools without producing a final message.
    #[error("participant made more than {limit} rounds of tool calls")]
    ToolLoopExhausted {
        /// Maximum rounds allowed.
        limit: usize,
    },

    /// The response had no usable message.
    #[error("empty response from upstream")]
    EmptyResponse,

    /// Anything else.
    #[error("upstream error: {0}")]
    Unknown(String),
}

impl InvocationError {
    /// Returns `true` for failures that may succeed on a later attempt.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::RateLimited { .. } | Self::Server(_)
        )
    }
}
