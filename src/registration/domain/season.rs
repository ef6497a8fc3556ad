//! Season shorthand decoding.
//!
//! A season is written as four digits `YYZZ`: the two-digit start year
//! followed by the two-digit end year. `2526` is the 2025–26 season. The
//! century is inferred: start years below 50 belong to the 2000s, the rest to
//! the 1900s. `9900` is the one shorthand that crosses a century boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CodeFormatError;

const CENTURY_PIVOT: u16 = 50;
const ROLLOVER_START: u16 = 99;
const ROLLOVER_END: u16 = 0;

/// A playing season with full four-digit start and end years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season {
    start_year: u16,
    end_year: u16,
}

impl Season {
    /// Decodes a four-digit season shorthand.
    ///
    /// # Errors
    ///
    /// Returns [`CodeFormatError::InvalidSeasonFormat`] when the token is not
    /// exactly four ASCII digits, and
    /// [`CodeFormatError::InvalidSeasonProgression`] when the end year is not
    /// `(start + 1) mod 100`.
    ///
    /// # Examples
    ///
    /// ```
    /// use touchline::registration::domain::Season;
    ///
    /// let season = Season::parse("9900").expect("rollover season is valid");
    /// assert_eq!(season.start_year(), 1999);
    /// assert_eq!(season.end_year(), 2000);
    /// ```
    pub fn parse(token: &str) -> Result<Self, CodeFormatError> {
        let well_formed = token.len() == 4 && token.chars().all(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(CodeFormatError::InvalidSeasonFormat(token.to_owned()));
        }

        let digits: u16 = token
            .parse()
            .map_err(|_| CodeFormatError::InvalidSeasonFormat(token.to_owned()))?;
        let start_yy = digits.div_euclid(100);
        let end_yy = digits.rem_euclid(100);

        if end_yy != (start_yy + 1).rem_euclid(100) {
            return Err(CodeFormatError::InvalidSeasonProgression {
                start: start_yy,
                end: end_yy,
            });
        }

        Ok(Self::from_two_digit_years(start_yy, end_yy))
    }

    fn from_two_digit_years(start_yy: u16, end_yy: u16) -> Self {
        let start_year = if start_yy < CENTURY_PIVOT {
            2000 + start_yy
        } else {
            1900 + start_yy
        };

        let end_year = if start_yy == ROLLOVER_START && end_yy == ROLLOVER_END {
            start_year + 1
        } else {
            let candidate = start_year.div_euclid(100) * 100 + end_yy;
            if candidate < start_year {
                candidate + 100
            } else {
                candidate
            }
        };

        Self {
            start_year,
            end_year,
        }
    }

    /// Returns the four-digit year the season starts in.
    #[must_use]
    pub const fn start_year(self) -> u16 {
        self.start_year
    }

    /// Returns the four-digit year the season ends in.
    #[must_use]
    pub const fn end_year(self) -> u16 {
        self.end_year
    }

    /// Returns the four-digit shorthand, e.g. `2526`.
    #[must_use]
    pub fn shorthand(self) -> String {
        format!(
            "{:02}{:02}",
            self.start_year.rem_euclid(100),
            self.end_year.rem_euclid(100)
        )
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.start_year, self.end_year.rem_euclid(100))
    }
}
