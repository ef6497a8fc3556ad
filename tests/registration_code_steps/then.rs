//! Then steps for registration code BDD scenarios.

use super::world::CodeWorld;
use rstest_bdd_macros::then;

#[then("the code is valid")]
fn code_is_valid(world: &CodeWorld) -> Result<(), eyre::Report> {
    world.details().map(|_| ())
}

#[then(r#"the code type is "{code_type}""#)]
fn code_type_is(world: &CodeWorld, code_type: String) -> Result<(), eyre::Report> {
    let actual = world.details()?.code_type();
    if actual.as_str() != code_type {
        return Err(eyre::eyre!("expected code type '{code_type}', got '{actual}'"));
    }
    Ok(())
}

#[then(r#"the team is "{team}""#)]
fn team_is(world: &CodeWorld, team: String) -> Result<(), eyre::Report> {
    let actual = world.details()?.team_name();
    if actual.as_str() != team {
        return Err(eyre::eyre!("expected team '{team}', got '{}'", actual.as_str()));
    }
    Ok(())
}

#[then("the age group is {age:u8}")]
fn age_group_is(world: &CodeWorld, age: u8) -> Result<(), eyre::Report> {
    let actual = world.details()?.age_group().value();
    if actual != age {
        return Err(eyre::eyre!("expected age group {age}, got {actual}"));
    }
    Ok(())
}

#[then("the season runs from {start:u16} to {end:u16}")]
fn season_runs(world: &CodeWorld, start: u16, end: u16) -> Result<(), eyre::Report> {
    let details = world.details()?;
    let actual = (details.season_start_year(), details.season_end_year());
    if actual != (start, end) {
        return Err(eyre::eyre!("expected season {start}-{end}, got {actual:?}"));
    }
    Ok(())
}

#[then(r#"the code is rejected because "{fragment}""#)]
fn code_is_rejected(world: &CodeWorld, fragment: String) -> Result<(), eyre::Report> {
    let reason = world.rejection()?.reason();
    if !reason.contains(&fragment) {
        return Err(eyre::eyre!("expected reason mentioning '{fragment}', got '{reason}'"));
    }
    Ok(())
}
