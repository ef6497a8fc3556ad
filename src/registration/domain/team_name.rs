//! Validated team name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CodeFormatError;

/// Team identifier taken from a registration code.
///
/// Only ASCII letters, digits and underscores are accepted. Case is preserved
/// because the club writes team names the way they appear on the fixture list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Validates a team token.
    ///
    /// # Errors
    ///
    /// Returns [`CodeFormatError::InvalidTeamName`] when the token is empty or
    /// contains characters outside `[A-Za-z0-9_]`.
    pub fn new(token: &str) -> Result<Self, CodeFormatError> {
        let is_valid = !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !is_valid {
            return Err(CodeFormatError::InvalidTeamName(token.to_owned()));
        }

        Ok(Self(token.to_owned()))
    }

    /// Returns the team name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TeamName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
