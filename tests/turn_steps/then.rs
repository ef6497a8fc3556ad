//! Then steps for turn controller BDD scenarios.

use super::world::{TurnWorld, participant};
use rstest_bdd_macros::then;
use touchline::conversation::domain::{ReplyKind, Role};

#[then(r#"the reply is a response from "{name}""#)]
fn reply_is_response_from(world: &TurnWorld, name: String) -> Result<(), eyre::Report> {
    let reply = &world.outcome()?.reply;
    if reply.kind != ReplyKind::Response {
        return Err(eyre::eyre!("expected a response, got {reply:?}"));
    }
    if reply.participant.as_ref().map(|p| p.as_str()) != Some(name.as_str()) {
        return Err(eyre::eyre!("expected reply from '{name}', got {reply:?}"));
    }
    Ok(())
}

#[then(r#"the reply text is "{text}""#)]
fn reply_text_is(world: &TurnWorld, text: String) -> Result<(), eyre::Report> {
    let reply = &world.outcome()?.reply;
    if reply.text != text {
        return Err(eyre::eyre!("expected reply '{text}', got '{}'", reply.text));
    }
    Ok(())
}

#[then(r#"the reply is a rejection mentioning "{code}""#)]
fn reply_is_rejection(world: &TurnWorld, code: String) -> Result<(), eyre::Report> {
    let reply = &world.outcome()?.reply;
    if reply.kind != ReplyKind::Rejection || !reply.text.contains(&code) {
        return Err(eyre::eyre!("expected a rejection mentioning '{code}', got {reply:?}"));
    }
    Ok(())
}

#[then("the reply is an error")]
fn reply_is_error(world: &TurnWorld) -> Result<(), eyre::Report> {
    let outcome = world.outcome()?;
    if !outcome.is_error() {
        return Err(eyre::eyre!("expected an error reply, got {:?}", outcome.reply));
    }
    if outcome.delta.len() != 2 {
        return Err(eyre::eyre!(
            "expected the error delta to hold the user message and the error, got {} entries",
            outcome.delta.len()
        ));
    }
    Ok(())
}

#[then(r#"the next participant is "{name}""#)]
fn next_participant_is(world: &TurnWorld, name: String) -> Result<(), eyre::Report> {
    let expected = participant(&name)?;
    let next = &world.outcome()?.next_participant;
    if next.as_ref() != Some(&expected) {
        return Err(eyre::eyre!("expected next participant '{name}', got {next:?}"));
    }
    Ok(())
}

#[then("there is no next participant")]
fn no_next_participant(world: &TurnWorld) -> Result<(), eyre::Report> {
    let next = &world.outcome()?.next_participant;
    if next.is_some() {
        return Err(eyre::eyre!("expected no next participant, got {next:?}"));
    }
    Ok(())
}

#[then("the participants were invoked {count:usize} times")]
fn participants_invoked(world: &TurnWorld, count: usize) -> Result<(), eyre::Report> {
    let calls = world.invoker.call_count();
    if calls != count {
        return Err(eyre::eyre!("expected {count} invocations, found {calls}"));
    }
    Ok(())
}

#[then(r#"{count:usize} handoff was recorded from "{from}" to "{to}""#)]
fn handoff_recorded(
    world: &TurnWorld,
    count: usize,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    let handoffs = &world.outcome()?.handoffs;
    if handoffs.len() != count {
        return Err(eyre::eyre!("expected {count} handoffs, got {handoffs:?}"));
    }
    let first = handoffs
        .first()
        .ok_or_else(|| eyre::eyre!("no handoff recorded"))?;
    if first.from.as_str() != from || first.to.as_str() != to {
        return Err(eyre::eyre!("expected {from} -> {to}, got {first:?}"));
    }
    Ok(())
}

#[then("no handoff was recorded")]
fn no_handoff_recorded(world: &TurnWorld) -> Result<(), eyre::Report> {
    let handoffs = &world.outcome()?.handoffs;
    if !handoffs.is_empty() {
        return Err(eyre::eyre!("expected no handoffs, got {handoffs:?}"));
    }
    Ok(())
}

#[then(r#""{name}" only saw the handoff summary"#)]
fn only_saw_summary(world: &TurnWorld, name: String) -> Result<(), eyre::Report> {
    let calls = world.invoker.calls();
    let call = calls
        .iter()
        .find(|call| call.participant.as_str() == name)
        .ok_or_else(|| eyre::eyre!("'{name}' was never invoked"))?;
    let [entry] = call.input.as_slice() else {
        return Err(eyre::eyre!(
            "expected a single summary entry, got {} entries",
            call.input.len()
        ));
    };
    if entry.role != Role::User || !entry.content.starts_with("[Handoff from ") {
        return Err(eyre::eyre!("expected a handoff summary, got {entry:?}"));
    }
    Ok(())
}
