//! Participant names and definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ConversationDomainError, ToolKind};

/// Registry key identifying a conversational participant.
///
/// Names are trimmed but otherwise kept verbatim, so `"Contact Details Agent"`
/// is a valid name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Creates a participant name.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationDomainError::EmptyParticipantName`] when the value
    /// is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ConversationDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConversationDomainError::EmptyParticipantName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ParticipantName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ParticipantName {
    type Error = ConversationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ParticipantName {
    type Error = ConversationDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParticipantName> for String {
    fn from(name: ParticipantName) -> Self {
        name.0
    }
}

/// How a participant's output is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputProtocol {
    /// Output must be a JSON completion signal.
    #[default]
    Structured,
    /// Output is plain conversational text and never completes the task.
    FreeText,
}

/// Immutable description of a participant: its instructions, the tools it
/// may call, and the participants it may hand off to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantDefinition {
    name: ParticipantName,
    instructions_template: String,
    description: Option<String>,
    tools: Vec<ToolKind>,
    handoffs: Vec<ParticipantName>,
    output_protocol: OutputProtocol,
}

impl ParticipantDefinition {
    /// Creates a structured-output participant with no tools or handoffs.
    #[must_use]
    pub fn new(name: ParticipantName, instructions_template: impl Into<String>) -> Self {
        Self {
            name,
            instructions_template: instructions_template.into(),
            description: None,
            tools: Vec::new(),
            handoffs: Vec::new(),
            output_protocol: OutputProtocol::Structured,
        }
    }

    /// Sets the short description used when other participants refer to this one.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a callable tool.
    #[must_use]
    pub fn with_tool(mut self, tool: ToolKind) -> Self {
        if !self.tools.contains(&tool) {
            self.tools.push(tool);
        }
        self
    }

    /// Adds a permitted handoff target.
    #[must_use]
    pub fn with_handoff(mut self, target: ParticipantName) -> Self {
        if !self.handoffs.contains(&target) {
            self.handoffs.push(target);
        }
        self
    }

    /// Sets the output protocol.
    #[must_use]
    pub const fn with_output_protocol(mut self, protocol: OutputProtocol) -> Self {
        self.output_protocol = protocol;
        self
    }

    /// Returns the participant name.
    #[must_use]
    pub const fn name(&self) -> &ParticipantName {
        &self.name
    }

    /// Returns the unrendered instruction template.
    #[must_use]
    pub fn instructions_template(&self) -> &str {
        &self.instructions_template
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the tools this participant may call.
    #[must_use]
    pub fn tools(&self) -> &[ToolKind] {
        &self.tools
    }

    /// Returns the declared handoff targets.
    #[must_use]
    pub fn handoffs(&self) -> &[ParticipantName] {
        &self.handoffs
    }

    /// Returns the output protocol.
    #[must_use]
    pub const fn output_protocol(&self) -> OutputProtocol {
        self.output_protocol
    }
}
