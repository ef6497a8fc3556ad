//! Registration-code parsing and validation.
//!
//! A registration code is handed to families by the club and has the shape
//! `TYPE-TEAM-AGE-SEASON`, for example `100-Tigers-10-2526`. The validator in
//! [`validator`] decomposes such a code into typed, season-resolved
//! [`domain::ParsedCodeDetails`] or rejects it with a human-readable reason.
//!
//! # Example
//!
//! ```
//! use touchline::registration::domain::CodeType;
//! use touchline::registration::validator::{CodeValidation, validate_registration_code};
//!
//! match validate_registration_code("100-Tigers-10-2526") {
//!     CodeValidation::Valid(details) => {
//!         assert_eq!(details.code_type(), CodeType::NewRegistration);
//!         assert_eq!(details.season_start_year(), 2025);
//!         assert_eq!(details.season_end_year(), 2026);
//!     }
//!     CodeValidation::Invalid(rejected) => panic!("unexpected rejection: {}", rejected.reason()),
//! }
//! ```

pub mod domain;
pub mod validator;

#[cfg(test)]
mod tests;
