//! Rejection reasons for malformed registration codes.

use thiserror::Error;

/// Reasons a registration code can be rejected.
///
/// The `Display` text is written for the person typing the code, so it can be
/// surfaced verbatim in a chat reply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodeFormatError {
    /// The code did not split into exactly four hyphen-separated parts.
    #[error("Code does not have 4 parts separated by hyphens.")]
    WrongPartCount,

    /// The first part was neither `100` nor `200`.
    #[error("Invalid code type '{0}'. Expected 100 (new registration) or 200 (renewal).")]
    InvalidCodeType(String),

    /// The team part was empty or contained characters outside `[A-Za-z0-9_]`.
    #[error("Invalid team name '{0}'. Only letters, numbers and underscores are allowed.")]
    InvalidTeamName(String),

    /// The age-group part was not a one or two digit number.
    #[error("Invalid age group '{0}'. Expected a 1 or 2 digit number.")]
    InvalidAgeGroupFormat(String),

    /// The age group was numeric but outside `1..=21`.
    #[error("Age group {0} is out of range. Expected a value between 1 and 21.")]
    AgeGroupOutOfRange(u8),

    /// The season part was not exactly four digits.
    #[error("Invalid season '{0}'. Expected 4 digits such as 2526.")]
    InvalidSeasonFormat(String),

    /// The season end year does not directly follow the start year.
    #[error(
        "Invalid season progression '{start:02}{end:02}'. The end year must be the year after the start year."
    )]
    InvalidSeasonProgression {
        /// Two-digit start year.
        start: u16,
        /// Two-digit end year.
        end: u16,
    },
}
