//! Record tools a participant may call while it runs.

use serde_json::{Value, json};
use std::fmt;

use super::ConversationDomainError;

/// Tools that write registration data to the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Creates a player record from a full name.
    WriteNameToDb,
    /// Sets the contact email on an existing player record.
    UpdateEmailInDb,
}

impl ToolKind {
    /// Every tool, in declaration order.
    pub const ALL: [Self; 2] = [Self::WriteNameToDb, Self::UpdateEmailInDb];

    /// Returns the function name exposed to the language model.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WriteNameToDb => "write_name_to_db",
            Self::UpdateEmailInDb => "update_email_in_db",
        }
    }

    /// Returns the description shown to the language model.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::WriteNameToDb => {
                "Writes the player's full name to the registration database. \
                 Splits the name into first and last name fields and returns the record ID."
            }
            Self::UpdateEmailInDb => {
                "Updates the 'player_email' field for the specified record_id in the \
                 registration database."
            }
        }
    }

    /// Returns the JSON schema of the tool arguments.
    #[must_use]
    pub fn parameters_schema(self) -> Value {
        match self {
            Self::WriteNameToDb => json!({
                "type": "object",
                "properties": {
                    "full_name": {
                        "type": "string",
                        "description": "The player's full name."
                    }
                },
                "required": ["full_name"],
                "additionalProperties": false
            }),
            Self::UpdateEmailInDb => json!({
                "type": "object",
                "properties": {
                    "record_id": {
                        "type": "string",
                        "description": "Record ID returned by write_name_to_db."
                    },
                    "email": {
                        "type": "string",
                        "description": "Contact email address."
                    }
                },
                "required": ["record_id", "email"],
                "additionalProperties": false
            }),
        }
    }
}

impl TryFrom<&str> for ToolKind {
    type Error = ConversationDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == value)
            .ok_or_else(|| ConversationDomainError::UnknownTool(value.to_owned()))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
