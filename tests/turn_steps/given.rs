//! Given steps for turn controller BDD scenarios.

use super::world::{DEFAULT_LIMIT, TurnWorld, participant};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use touchline::conversation::domain::HandoffSignal;
use touchline::conversation::ports::invoker::InvocationError;

fn encode(signal: &HandoffSignal) -> Result<String, eyre::Report> {
    signal.to_json().wrap_err("encode scripted handoff signal")
}

#[given("the club participants are loaded")]
fn club_participants_loaded(world: &mut TurnWorld) -> Result<(), eyre::Report> {
    world.load_participants(DEFAULT_LIMIT)
}

#[given("the club participants are loaded with a handoff limit of {limit:usize}")]
fn club_participants_loaded_with_limit(
    world: &mut TurnWorld,
    limit: usize,
) -> Result<(), eyre::Report> {
    world.load_participants(limit)
}

#[given(r#""{name}" replies "{text}""#)]
fn participant_replies(world: &mut TurnWorld, name: String, text: String) -> Result<(), eyre::Report> {
    let output = encode(&HandoffSignal::in_progress(text))?;
    world.invoker.push_output(&participant(&name)?, output);
    Ok(())
}

#[given(r#""{name}" completes and hands off to "{target}""#)]
fn participant_hands_off(
    world: &mut TurnWorld,
    name: String,
    target: String,
) -> Result<(), eyre::Report> {
    let output = encode(&HandoffSignal::complete(
        "Player details recorded.",
        Some(participant(&target)?),
    ))?;
    world.invoker.push_output(&participant(&name)?, output);
    Ok(())
}

#[given(r#""{name}" always hands off to "{target}""#)]
fn participant_always_hands_off(
    world: &mut TurnWorld,
    name: String,
    target: String,
) -> Result<(), eyre::Report> {
    let output = encode(&HandoffSignal::complete(
        "Done here.",
        Some(participant(&target)?),
    ))?;
    world.invoker.repeat_output(&participant(&name)?, output);
    Ok(())
}

#[given(r#""{name}" is rate limited"#)]
fn participant_rate_limited(world: &mut TurnWorld, name: String) -> Result<(), eyre::Report> {
    world.invoker.push_error(
        &participant(&name)?,
        InvocationError::RateLimited {
            message: "too many requests".to_owned(),
            retry_after: None,
        },
    );
    Ok(())
}
