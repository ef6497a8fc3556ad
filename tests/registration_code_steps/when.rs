//! When steps for registration code BDD scenarios.

use super::world::CodeWorld;
use rstest_bdd_macros::when;
use touchline::registration::validator::validate_registration_code;

#[when(r#"the code "{code}" is validated"#)]
fn code_is_validated(world: &mut CodeWorld, code: String) {
    world.last_validation = Some(validate_registration_code(&code));
}
