//! Shared world state for turn controller BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use touchline::conversation::adapters::memory::{
    InMemoryParticipantRegistry, NEW_REGISTRATION_AGENT, RENEW_REGISTRATION_AGENT, ScriptedInvoker,
};
use touchline::conversation::domain::{ParticipantName, TurnOutcome, TurnRequest};
use touchline::conversation::services::{
    DEFAULT_MAX_HANDOFF_CHAIN, TurnController, TurnSettings,
};

/// Controller type used by the BDD world.
pub type TestController = TurnController<InMemoryParticipantRegistry, ScriptedInvoker>;

/// Scenario world for turn controller behaviour tests.
pub struct TurnWorld {
    /// Controller under test, built by a `Given` step.
    pub controller: Option<TestController>,
    /// Scripted participant outputs shared with the controller.
    pub invoker: ScriptedInvoker,
    /// Request of the last turn.
    pub last_request: Option<TurnRequest>,
    /// Outcome of the last turn.
    pub last_outcome: Option<TurnOutcome>,
}

impl TurnWorld {
    /// Creates a world with no controller.
    #[must_use]
    pub fn new() -> Self {
        Self {
            controller: None,
            invoker: ScriptedInvoker::new(),
            last_request: None,
            last_outcome: None,
        }
    }

    /// Builds a controller over the club participants.
    pub fn load_participants(&mut self, max_handoff_chain: usize) -> Result<(), eyre::Report> {
        let registry = InMemoryParticipantRegistry::canonical()
            .map_err(|err| eyre::eyre!("club registry failed to build: {err}"))?;
        let settings = TurnSettings::new(
            participant(NEW_REGISTRATION_AGENT)?,
            participant(RENEW_REGISTRATION_AGENT)?,
        )
        .with_max_handoff_chain(max_handoff_chain);
        self.controller = Some(TurnController::new(
            Arc::new(registry),
            Arc::new(self.invoker.clone()),
            settings,
        ));
        Ok(())
    }

    /// Returns the controller built by a `Given` step.
    pub fn controller(&self) -> Result<&TestController, eyre::Report> {
        self.controller
            .as_ref()
            .ok_or_else(|| eyre::eyre!("participants were not loaded in scenario world"))
    }

    /// Returns the outcome of the last turn.
    pub fn outcome(&self) -> Result<&TurnOutcome, eyre::Report> {
        self.last_outcome
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no turn has run in scenario world"))
    }
}

impl Default for TurnWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a participant name used in a step.
pub fn participant(name: &str) -> Result<ParticipantName, eyre::Report> {
    ParticipantName::new(name).map_err(|err| eyre::eyre!("invalid participant '{name}': {err}"))
}

/// Chain limit used unless a scenario sets one.
pub const DEFAULT_LIMIT: usize = DEFAULT_MAX_HANDOFF_CHAIN;

/// Fixture providing a fresh turn world.
#[fixture]
pub fn world() -> TurnWorld {
    TurnWorld::new()
}

/// Runs an async operation from synchronous step code.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
