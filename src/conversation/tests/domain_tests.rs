//! Tests for conversation domain values.

use crate::conversation::domain::{
    InstructionContext, ParticipantDefinition, ParticipantName, Role, SessionId, SessionState,
    ToolKind, Transcript, TranscriptEntry, TurnRequest,
};
use crate::registration::validator::validate_registration_code;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("Contact Details Agent", "Contact Details Agent")]
#[case("  New Registration Agent \n", "New Registration Agent")]
fn participant_names_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
    let name = ParticipantName::new(raw).expect("valid name");
    assert_eq!(name.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_participant_names_are_rejected(#[case] raw: &str) {
    assert!(ParticipantName::new(raw).is_err());
}

#[rstest]
fn participant_names_deserialize_with_validation() {
    let name: ParticipantName = serde_json::from_str("\"Renew Registration Agent\"").expect("decodes");
    assert_eq!(name.as_str(), "Renew Registration Agent");
    assert!(serde_json::from_str::<ParticipantName>("\"\"").is_err());
}

#[rstest]
fn definitions_ignore_duplicate_tools_and_handoffs() {
    let target = ParticipantName::new("B").expect("name");
    let definition = ParticipantDefinition::new(ParticipantName::new("A").expect("name"), "hi")
        .with_tool(ToolKind::WriteNameToDb)
        .with_tool(ToolKind::WriteNameToDb)
        .with_handoff(target.clone())
        .with_handoff(target);

    assert_eq!(definition.tools(), &[ToolKind::WriteNameToDb]);
    assert_eq!(definition.handoffs().len(), 1);
}

#[rstest]
#[case("write_name_to_db", ToolKind::WriteNameToDb)]
#[case("update_email_in_db", ToolKind::UpdateEmailInDb)]
fn tool_names_round_trip(#[case] name: &str, #[case] expected: ToolKind) {
    assert_eq!(ToolKind::try_from(name), Ok(expected));
    assert_eq!(expected.name(), name);
    assert_eq!(expected.parameters_schema()["type"], "object");
}

#[rstest]
fn transcript_serializes_as_role_content_pairs() {
    let transcript = Transcript::from(vec![
        TranscriptEntry::user("100-Tigers-10-2526"),
        TranscriptEntry::assistant("Welcome!"),
    ]);
    let json = serde_json::to_value(&transcript).expect("serializes");
    assert_eq!(
        json,
        serde_json::json!([
            {"role": "user", "content": "100-Tigers-10-2526"},
            {"role": "assistant", "content": "Welcome!"}
        ])
    );
    assert_eq!(transcript.last().map(|entry| entry.role), Some(Role::Assistant));
}

#[rstest]
#[case(None, true)]
#[case(Some(""), true)]
#[case(Some("  "), true)]
#[case(Some("Contact Details Agent"), false)]
fn session_start_is_signalled_by_missing_participant(
    #[case] last: Option<&str>,
    #[case] expected: bool,
) {
    let request = TurnRequest {
        user_message: "hi".to_owned(),
        history: Transcript::new(),
        last_participant_name: last.map(str::to_owned),
    };
    assert_eq!(request.is_session_start(), expected);
}

#[rstest]
fn turn_requests_accept_the_legacy_field_name() {
    let request: TurnRequest = serde_json::from_str(
        r#"{"user_message": "yes", "last_agent_name": "New Registration Agent"}"#,
    )
    .expect("decodes");
    assert_eq!(
        request.last_participant_name.as_deref(),
        Some("New Registration Agent")
    );
    assert!(request.history.is_empty());
}

#[rstest]
fn seeded_context_carries_registration_details() {
    let details = validate_registration_code("200-Lions_B-15-9900")
        .into_result()
        .expect("valid code");
    let mut context = InstructionContext::seeded(&details);

    let seed = context.registration().expect("seeded");
    assert_eq!(seed.membership_status, "existing");
    assert_eq!(seed.team_name, "Lions_B");
    assert_eq!(seed.age_group, "U15");
    assert_eq!(seed.season, "1999-00");
    assert_eq!(seed.season_start_year, 1999);
    assert_eq!(seed.season_end_year, 2000);

    context.clear_seed();
    assert!(!context.is_seeded());
    assert_eq!(context, InstructionContext::unseeded());
}

#[rstest]
fn sessions_start_with_the_greeting_and_no_participant() {
    let session = SessionState::new(&DefaultClock).with_greeting("Hello!");
    assert_eq!(session.transcript.len(), 1);
    assert!(session.next_participant.is_none());
    assert_eq!(session.turn_count, 0);
    assert_eq!(session.created_at, session.updated_at);
}

#[rstest]
fn session_ids_parse_from_their_display_form() {
    let id = SessionId::new();
    let parsed: SessionId = id.to_string().parse().expect("parses");
    assert_eq!(parsed, id);
    assert!("not-a-uuid".parse::<SessionId>().is_err());
}
