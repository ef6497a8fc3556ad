//! Registration code type token.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CodeFormatError;

/// Whether a code opens a new membership or renews an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    /// Token `100`: a player joining the club for the first time.
    NewRegistration,
    /// Token `200`: a returning player renewing for a new season.
    RenewalRegistration,
}

impl CodeType {
    /// Returns the token used for this type inside a registration code.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::NewRegistration => "100",
            Self::RenewalRegistration => "200",
        }
    }

    /// Returns the membership status phrase used in participant prompts.
    #[must_use]
    pub const fn membership_status(self) -> &'static str {
        match self {
            Self::NewRegistration => "new",
            Self::RenewalRegistration => "existing",
        }
    }

    /// Returns the type as a snake-case string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewRegistration => "new_registration",
            Self::RenewalRegistration => "renewal_registration",
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CodeType {
    type Error = CodeFormatError;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        match token {
            "100" => Ok(Self::NewRegistration),
            "200" => Ok(Self::RenewalRegistration),
            _ => Err(CodeFormatError::InvalidCodeType(token.to_owned())),
        }
    }
}
