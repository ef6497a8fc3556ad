//! Fully validated registration code details.

use serde::{Deserialize, Serialize};

use super::{AgeGroup, CodeType, Season, TeamName};

/// The typed fields decoded from a valid registration code.
///
/// Values of this type are only produced by
/// [`validate_registration_code`](crate::registration::validator::validate_registration_code)
/// after all four parts of the code have been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCodeDetails {
    code_type: CodeType,
    team_name: TeamName,
    age_group: AgeGroup,
    season: Season,
    raw_code: String,
}

impl ParsedCodeDetails {
    pub(crate) const fn new(
        code_type: CodeType,
        team_name: TeamName,
        age_group: AgeGroup,
        season: Season,
        raw_code: String,
    ) -> Self {
        Self {
            code_type,
            team_name,
            age_group,
            season,
            raw_code,
        }
    }

    /// Returns whether the code is for a new registration or a renewal.
    #[must_use]
    pub const fn code_type(&self) -> CodeType {
        self.code_type
    }

    /// Returns the team name.
    #[must_use]
    pub const fn team_name(&self) -> &TeamName {
        &self.team_name
    }

    /// Returns the age group.
    #[must_use]
    pub const fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    /// Returns the decoded season.
    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    /// Returns the four-digit year the season starts in.
    #[must_use]
    pub const fn season_start_year(&self) -> u16 {
        self.season.start_year()
    }

    /// Returns the four-digit year the season ends in.
    #[must_use]
    pub const fn season_end_year(&self) -> u16 {
        self.season.end_year()
    }

    /// Returns the code exactly as it was supplied.
    #[must_use]
    pub fn raw_code(&self) -> &str {
        &self.raw_code
    }
}
