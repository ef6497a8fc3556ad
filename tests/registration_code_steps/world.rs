//! Shared world state for registration code BDD scenarios.

use rstest::fixture;
use touchline::registration::domain::ParsedCodeDetails;
use touchline::registration::validator::{CodeValidation, RejectedCode};

/// Scenario world for registration code behaviour tests.
#[derive(Default)]
pub struct CodeWorld {
    /// Result of the last validation.
    pub last_validation: Option<CodeValidation>,
}

impl CodeWorld {
    /// Returns the details of the last validation, failing if it was rejected.
    pub fn details(&self) -> Result<&ParsedCodeDetails, eyre::Report> {
        match self.last_validation.as_ref() {
            Some(CodeValidation::Valid(details)) => Ok(details),
            Some(CodeValidation::Invalid(rejected)) => Err(eyre::eyre!(
                "expected a valid code, got rejection: {}",
                rejected.reason()
            )),
            None => Err(eyre::eyre!("no code has been validated in scenario world")),
        }
    }

    /// Returns the rejection of the last validation, failing if it was valid.
    pub fn rejection(&self) -> Result<&RejectedCode, eyre::Report> {
        match self.last_validation.as_ref() {
            Some(CodeValidation::Invalid(rejected)) => Ok(rejected),
            Some(CodeValidation::Valid(details)) => {
                Err(eyre::eyre!("expected a rejection, got {details:?}"))
            }
            None => Err(eyre::eyre!("no code has been validated in scenario world")),
        }
    }
}

/// Fixture providing a fresh code world.
#[fixture]
pub fn world() -> CodeWorld {
    CodeWorld::default()
}
