//! When steps for turn controller BDD scenarios.

use super::world::{TurnWorld, run_async};
use rstest_bdd_macros::when;
use touchline::conversation::domain::{Transcript, TurnRequest};

#[when(r#"the user starts with "{message}""#)]
fn user_starts_with(world: &mut TurnWorld, message: String) -> Result<(), eyre::Report> {
    let request = TurnRequest::first(message);
    let outcome = run_async(world.controller()?.run_turn(&request));
    world.last_request = Some(request);
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"the user resumes "{name}" with "{message}""#)]
fn user_resumes_with(
    world: &mut TurnWorld,
    name: String,
    message: String,
) -> Result<(), eyre::Report> {
    let request = TurnRequest::resume(message, Transcript::new(), name);
    let outcome = run_async(world.controller()?.run_turn(&request));
    world.last_request = Some(request);
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when("the user retries the last message")]
fn user_retries(world: &mut TurnWorld) -> Result<(), eyre::Report> {
    let previous = world
        .last_request
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no earlier request in scenario world"))?;
    let outcome = world.outcome()?;
    let mut history = previous.history.clone();
    history.extend_from(&outcome.delta);
    let request = TurnRequest {
        user_message: previous.user_message.clone(),
        history,
        last_participant_name: outcome
            .next_participant
            .as_ref()
            .map(|name| name.as_str().to_owned()),
    };
    let retried = run_async(world.controller()?.run_turn(&request));
    world.last_request = Some(request);
    world.last_outcome = Some(retried);
    Ok(())
}
