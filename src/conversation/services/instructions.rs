//! Instruction template rendering.

use minijinja::Environment;
use thiserror::Error;

use crate::conversation::domain::InstructionContext;

/// Formatting rules appended to every participant's instructions.
pub const FORMATTING_GUIDELINES: &str = "\
IMPORTANT: When providing text meant for the user (e.g., in 'agent_response_text'), use the following formatting guidelines:
- Use double line breaks (creating an empty line) between distinct pieces of information or questions for visual separation.
- Use bold for emphasis and important information using Markdown (e.g., **this is important**).
- Use bullet points and numbered lists for structured information.
- Use headings (## and ###) for section titles where appropriate.
- Use code formatting (backticks) for codes or specific inputs.
";

/// Template rendering failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("template render failed: {reason}")]
pub struct InstructionError {
    /// Renderer diagnostic.
    pub reason: String,
}

/// Appends [`FORMATTING_GUIDELINES`] to a set of instructions.
#[must_use]
pub fn append_formatting_guidelines(instructions: &str) -> String {
    format!("{}\n\n{FORMATTING_GUIDELINES}", instructions.trim_end())
}

/// Renders an instruction template against a context.
///
/// Templates use Jinja syntax. The context exposes `club_name` and, when the
/// session was seeded from a registration code, `registration` with its
/// fields (`team_name`, `age_group`, `season`, `membership_status`, ...).
///
/// # Examples
///
/// ```
/// use touchline::conversation::domain::InstructionContext;
/// use touchline::conversation::services::render_instructions;
///
/// let rendered = render_instructions(
///     "Welcome to {{ club_name }}.{% if registration %} Seeded.{% endif %}",
///     &InstructionContext::unseeded(),
/// )
/// .expect("template renders");
/// assert_eq!(rendered, "Welcome to Urmston Town Juniors FC.");
/// ```
///
/// # Errors
///
/// Returns [`InstructionError`] when the template has a syntax error.
pub fn render_instructions(
    template: &str,
    context: &InstructionContext,
) -> Result<String, InstructionError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| InstructionError {
            reason: error.to_string(),
        })
}
