//! Instruction context rendered into participant templates.

use serde::Serialize;

use crate::registration::domain::ParsedCodeDetails;

/// Club the assistant registers players for.
pub const CLUB_NAME: &str = "Urmston Town Juniors FC";

/// Registration details decoded from the code a session started with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationContext {
    /// `"new"` or `"existing"`.
    pub membership_status: String,
    /// `"new_registration"` or `"renewal_registration"`.
    pub code_type: String,
    /// Team name as written in the code.
    pub team_name: String,
    /// Age group label, e.g. `U10`.
    pub age_group: String,
    /// Season label, e.g. `2025-26`.
    pub season: String,
    /// First calendar year of the season.
    pub season_start_year: u16,
    /// Second calendar year of the season.
    pub season_end_year: u16,
    /// The registration code the user supplied.
    pub registration_code: String,
}

impl From<&ParsedCodeDetails> for RegistrationContext {
    fn from(details: &ParsedCodeDetails) -> Self {
        Self {
            membership_status: details.code_type().membership_status().to_owned(),
            code_type: details.code_type().as_str().to_owned(),
            team_name: details.team_name().as_str().to_owned(),
            age_group: details.age_group().to_string(),
            season: details.season().to_string(),
            season_start_year: details.season_start_year(),
            season_end_year: details.season_end_year(),
            registration_code: details.raw_code().trim().to_owned(),
        }
    }
}

/// Values available to instruction templates.
///
/// The registration seed is present only for the participant chosen from the
/// registration code and is cleared on the first silent handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionContext {
    club_name: String,
    registration: Option<RegistrationContext>,
}

impl InstructionContext {
    /// Creates a context without registration details.
    #[must_use]
    pub fn unseeded() -> Self {
        Self {
            club_name: CLUB_NAME.to_owned(),
            registration: None,
        }
    }

    /// Creates a context seeded from a validated registration code.
    #[must_use]
    pub fn seeded(details: &ParsedCodeDetails) -> Self {
        Self {
            club_name: CLUB_NAME.to_owned(),
            registration: Some(RegistrationContext::from(details)),
        }
    }

    /// Drops the registration seed.
    pub fn clear_seed(&mut self) {
        self.registration = None;
    }

    /// Returns the registration seed, if present.
    #[must_use]
    pub const fn registration(&self) -> Option<&RegistrationContext> {
        self.registration.as_ref()
    }

    /// Returns `true` when registration details are present.
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        self.registration.is_some()
    }

    /// Returns the club name.
    #[must_use]
    pub fn club_name(&self) -> &str {
        &self.club_name
    }
}

impl Default for InstructionContext {
    fn default() -> Self {
        Self::unseeded()
    }
}
