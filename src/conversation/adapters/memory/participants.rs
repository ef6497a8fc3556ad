//! Built-in participant definitions for the club registration flow.

use crate::conversation::domain::{ParticipantDefinition, ParticipantName, ToolKind};
use crate::conversation::ports::registry::RegistryResult;
use crate::conversation::services::append_formatting_guidelines;

/// Starts registrations for new players.
pub const NEW_REGISTRATION_AGENT: &str = "New Registration Agent";
/// Starts registrations for returning players.
pub const RENEW_REGISTRATION_AGENT: &str = "Renew Registration Agent";
/// Captures and stores contact details.
pub const CONTACT_DETAILS_AGENT: &str = "Contact Details Agent";

const SIGNAL_PROTOCOL: &str = r#"**CRITICAL INSTRUCTION: Every response MUST be a single JSON object with exactly these fields. No other text or formatting outside this JSON object is permitted.**

- `agent_response_text` (string): your message to the user for this turn. Follow the formatting guidelines at the end of these instructions.
- `overall_task_complete` (boolean): `true` ONLY once every sub-task below is finished; otherwise `false`.
- `pass_off_to_agent` (string or null): the participant to hand over to. Set it ONLY when `overall_task_complete` is `true`; otherwise `null`."#;

const NEW_REGISTRATION_TEMPLATE: &str = r#"You are an assigned agent which forms part of a registration system for a grassroots football club called {{ club_name }}, based in Manchester, England.
{% if registration %}
You have been passed the following starting details for this registration:
- Membership Status: {{ registration.membership_status }}
- Team Name: {{ registration.team_name }}
- Age Group: {{ registration.age_group }}
- Registration Season: {{ registration.season }}
{% endif %}
{{ protocol }}

**Your sub-tasks (work through these one at a time):**

1. Welcome the user to the registration portal, briefly acknowledging the key details you have received (e.g. "Welcome to registration for the {{ registration.team_name if registration else "team" }} {{ registration.age_group if registration else "" }} for the {{ registration.season if registration else "coming" }} season!") and ask for their first and last name to begin. Refer to them by first name only for the rest of the conversation.
2. Validate their name: it must contain real text only, no symbols or digits, and consist of at least two parts.
3. Determine whether the user is a parent registering their child or a player registering themselves. If the age group is below U16 assume the user is a parent and skip this step. For U16 and above, ask and clarify.

**Task completion:** once every sub-task is done, reply with a brief concluding message, set `overall_task_complete` to `true` and set `pass_off_to_agent` to "{{ next_participant }}"."#;

const RENEW_REGISTRATION_TEMPLATE: &str = r#"You are the Renew Registration Agent for {{ club_name }}.
{% if registration %}
You have received the following details from a validated registration code:
- Membership Status: {{ registration.membership_status }}
- Team Name: {{ registration.team_name }}
- Age Group: {{ registration.age_group }}
- Registration Season: {{ registration.season }}
{% endif %}
{{ protocol }}

**Your sub-tasks:**

1. Acknowledge the details you have received (Membership Status, Team Name, Age Group, Season) and welcome the player back to the club.
2. Confirm with the user that they want to renew the registration for this team and season.

**Task completion:** once the user has confirmed, reply with a brief concluding message, set `overall_task_complete` to `true` and set `pass_off_to_agent` to "{{ next_participant }}"."#;

const CONTACT_DETAILS_TEMPLATE: &str = r#"You are the contact details specialist for {{ club_name }}. Your primary task is to capture the contact details for the player and the parent or guardian involved in the registration.

{{ protocol }}

**Follow these steps precisely:**

1. Casually ask the user to confirm whether they are a parent or guardian, or a player over 16 years of age.
2. Once answered, ask for their full name (this is the registrar's name).
3. If they are the parent or guardian, ask for their child's full name.
4. Once you have the player's name, use the `write_name_to_db` tool to save it. The tool returns the record ID; remember it.
5. Ask for a contact email address.
6. Use the `update_email_in_db` tool with the record ID and the email address.
7. If a tool result begins with `Error:`, apologise and ask the user to check the details.

**Task completion:** once the email has been saved, thank the user, set `overall_task_complete` to `true` and leave `pass_off_to_agent` as `null`."#;

/// Returns the built-in participants.
///
/// # Errors
///
/// Returns a registry error only if a built-in name is invalid.
pub fn canonical_participants() -> RegistryResult<Vec<ParticipantDefinition>> {
    let new_registration = ParticipantName::new(NEW_REGISTRATION_AGENT)?;
    let renewal = ParticipantName::new(RENEW_REGISTRATION_AGENT)?;
    let contact_details = ParticipantName::new(CONTACT_DETAILS_AGENT)?;

    Ok(vec![
        ParticipantDefinition::new(
            new_registration,
            template(NEW_REGISTRATION_TEMPLATE, Some(CONTACT_DETAILS_AGENT)),
        )
        .with_description("Welcomes new players and collects the registrar's name.")
        .with_handoff(contact_details.clone()),
        ParticipantDefinition::new(
            renewal,
            template(RENEW_REGISTRATION_TEMPLATE, Some(CONTACT_DETAILS_AGENT)),
        )
        .with_description("Confirms renewal details for returning players.")
        .with_handoff(contact_details.clone()),
        ParticipantDefinition::new(contact_details, template(CONTACT_DETAILS_TEMPLATE, None))
            .with_description(
                "Captures contact details during registration and writes them to the database.",
            )
            .with_tool(ToolKind::WriteNameToDb)
            .with_tool(ToolKind::UpdateEmailInDb),
    ])
}

fn template(body: &str, next_participant: Option<&str>) -> String {
    let with_protocol = body
        .replace("{{ protocol }}", SIGNAL_PROTOCOL)
        .replace("{{ next_participant }}", next_participant.unwrap_or_default());
    append_formatting_guidelines(&with_protocol)
}
