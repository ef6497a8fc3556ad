//! Validated age group.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CodeFormatError;

const MIN_AGE_GROUP: u8 = 1;
const MAX_AGE_GROUP: u8 = 21;

/// Age group of a junior team, from under-1s through under-21s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgeGroup(u8);

impl AgeGroup {
    /// Parses a one or two digit age-group token.
    ///
    /// # Errors
    ///
    /// Returns [`CodeFormatError::InvalidAgeGroupFormat`] for tokens that are
    /// not one or two ASCII digits, and
    /// [`CodeFormatError::AgeGroupOutOfRange`] for values outside `1..=21`.
    pub fn parse(token: &str) -> Result<Self, CodeFormatError> {
        let well_formed =
            (1..=2).contains(&token.len()) && token.chars().all(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(CodeFormatError::InvalidAgeGroupFormat(token.to_owned()));
        }

        let value: u8 = token
            .parse()
            .map_err(|_| CodeFormatError::InvalidAgeGroupFormat(token.to_owned()))?;

        Self::new(value)
    }

    /// Creates an age group from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`CodeFormatError::AgeGroupOutOfRange`] for values outside
    /// `1..=21`.
    pub fn new(value: u8) -> Result<Self, CodeFormatError> {
        if value < MIN_AGE_GROUP || value > MAX_AGE_GROUP {
            return Err(CodeFormatError::AgeGroupOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric age group.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}", self.0)
    }
}
