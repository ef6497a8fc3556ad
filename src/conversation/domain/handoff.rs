//! Structured completion signal emitted by participants.

use serde::{Deserialize, Serialize};

use super::{ParticipantName, SignalParseError};

/// Completion flag a participant attaches to every reply.
///
/// The JSON field names follow the wire format participants are instructed to
/// produce (`agent_response_text`, `overall_task_complete`,
/// `pass_off_to_agent`); the shorter `response_text`, `task_complete` and
/// `next_participant` spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoffSignal {
    #[serde(rename = "agent_response_text")]
    response_text: String,
    #[serde(rename = "overall_task_complete")]
    task_complete: bool,
    #[serde(rename = "pass_off_to_agent")]
    next_participant: Option<ParticipantName>,
}

#[derive(Deserialize)]
struct WireSignal {
    #[serde(alias = "response_text")]
    agent_response_text: String,
    #[serde(alias = "task_complete")]
    overall_task_complete: bool,
    #[serde(alias = "next_participant", default)]
    pass_off_to_agent: Option<String>,
}

impl HandoffSignal {
    /// Creates a signal for a reply that keeps the task open.
    #[must_use]
    pub fn in_progress(response_text: impl Into<String>) -> Self {
        Self {
            response_text: response_text.into(),
            task_complete: false,
            next_participant: None,
        }
    }

    /// Creates a signal for a completed task, optionally naming the next
    /// participant.
    #[must_use]
    pub fn complete(
        response_text: impl Into<String>,
        next_participant: Option<ParticipantName>,
    ) -> Self {
        Self {
            response_text: response_text.into(),
            task_complete: true,
            next_participant,
        }
    }

    /// Decodes raw participant output.
    ///
    /// A surrounding Markdown code fence is ignored. A blank handoff target is
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`SignalParseError::Malformed`] when the output is not a JSON
    /// object with the required fields, or
    /// [`SignalParseError::TargetWithoutCompletion`] when a handoff target is
    /// named while the task is still open.
    pub fn parse(raw_output: &str) -> Result<Self, SignalParseError> {
        let wire: WireSignal = serde_json::from_str(strip_code_fence(raw_output))
            .map_err(|err| SignalParseError::Malformed(err.to_string()))?;

        let next_participant = wire
            .pass_off_to_agent
            .and_then(|target| ParticipantName::new(target).ok());

        if let Some(target) = next_participant.as_ref().filter(|_| !wire.overall_task_complete) {
            return Err(SignalParseError::TargetWithoutCompletion(
                target.as_str().to_owned(),
            ));
        }

        Ok(Self {
            response_text: wire.agent_response_text,
            task_complete: wire.overall_task_complete,
            next_participant,
        })
    }

    /// Wraps free-text output as an in-progress signal.
    #[must_use]
    pub fn from_free_text(raw_output: &str) -> Self {
        Self::in_progress(raw_output.trim())
    }

    /// Returns the text meant for the user.
    #[must_use]
    pub fn response_text(&self) -> &str {
        &self.response_text
    }

    /// Returns `true` when the participant reports its task as complete.
    #[must_use]
    pub const fn task_complete(&self) -> bool {
        self.task_complete
    }

    /// Returns the named next participant, if any.
    #[must_use]
    pub const fn next_participant(&self) -> Option<&ParticipantName> {
        self.next_participant.as_ref()
    }

    /// Returns the participant to hand off to silently, if this signal
    /// requests a handoff away from `current`.
    ///
    /// A completed task that names `current` itself is not a handoff.
    #[must_use]
    pub fn handoff_target(&self, current: &ParticipantName) -> Option<&ParticipantName> {
        if !self.task_complete {
            return None;
        }
        self.next_participant
            .as_ref()
            .filter(|target| *target != current)
    }

    /// Serialises the signal in its wire format.
    ///
    /// # Errors
    ///
    /// Returns the underlying serialisation error, which cannot occur for
    /// well-formed names.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn strip_code_fence(raw_output: &str) -> &str {
    let trimmed = raw_output.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // A fence on one line has its language tag directly before the body.
    let body = after_open.split_once('\n').map_or_else(
        || after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        |(_, rest)| rest,
    );
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
