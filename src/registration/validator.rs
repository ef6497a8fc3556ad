//! Registration code validation.
//!
//! [`validate_registration_code`] is a pure function: it performs no I/O,
//! never panics, and returns the same result for the same input. Each part of
//! the code is checked in order and the first failure wins.

use super::domain::{AgeGroup, CodeFormatError, CodeType, ParsedCodeDetails, Season, TeamName};

/// Outcome of validating a registration code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeValidation {
    /// Every part of the code was accepted.
    Valid(ParsedCodeDetails),
    /// The code was rejected.
    Invalid(RejectedCode),
}

impl CodeValidation {
    /// Returns `true` if the code was accepted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Converts the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`RejectedCode`] when the code was invalid.
    pub fn into_result(self) -> Result<ParsedCodeDetails, RejectedCode> {
        match self {
            Self::Valid(details) => Ok(details),
            Self::Invalid(rejected) => Err(rejected),
        }
    }
}

/// A rejected code together with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedCode {
    raw_code: String,
    error: CodeFormatError,
}

impl RejectedCode {
    /// Returns the code exactly as it was supplied.
    #[must_use]
    pub fn raw_code(&self) -> &str {
        &self.raw_code
    }

    /// Returns the typed rejection reason.
    #[must_use]
    pub const fn error(&self) -> &CodeFormatError {
        &self.error
    }

    /// Returns the human-readable rejection reason.
    #[must_use]
    pub fn reason(&self) -> String {
        self.error.to_string()
    }
}

/// Parses and validates a registration code of the form
/// `TYPE-TEAM-AGE-SEASON`.
///
/// Leading and trailing whitespace is ignored; the untrimmed input is kept as
/// the raw code for diagnostics.
///
/// # Examples
///
/// ```
/// use touchline::registration::domain::CodeFormatError;
/// use touchline::registration::validator::{CodeValidation, validate_registration_code};
///
/// let CodeValidation::Invalid(rejected) = validate_registration_code("100-TeamC-22-1011") else {
///     panic!("age 22 is out of range");
/// };
/// assert_eq!(rejected.error(), &CodeFormatError::AgeGroupOutOfRange(22));
/// ```
#[must_use]
pub fn validate_registration_code(raw_code: &str) -> CodeValidation {
    match parse_parts(raw_code.trim()) {
        Ok((code_type, team_name, age_group, season)) => CodeValidation::Valid(
            ParsedCodeDetails::new(code_type, team_name, age_group, season, raw_code.to_owned()),
        ),
        Err(error) => CodeValidation::Invalid(RejectedCode {
            raw_code: raw_code.to_owned(),
            error,
        }),
    }
}

fn parse_parts(code: &str) -> Result<(CodeType, TeamName, AgeGroup, Season), CodeFormatError> {
    let parts: Vec<&str> = code.split('-').collect();
    let [type_token, team_token, age_token, season_token] = parts.as_slice() else {
        return Err(CodeFormatError::WrongPartCount);
    };

    let code_type = CodeType::try_from(*type_token)?;
    let team_name = TeamName::new(team_token)?;
    let age_group = AgeGroup::parse(age_token)?;
    let season = Season::parse(season_token)?;

    Ok((code_type, team_name, age_group, season))
}
