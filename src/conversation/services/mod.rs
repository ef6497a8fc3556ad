//! Conversation services: instruction rendering, the turn controller, the
//! session-backed conversation service, and record tools.

mod instructions;
mod session;
mod tools;
mod turn;

pub use instructions::{
    FORMATTING_GUIDELINES, InstructionError, append_formatting_guidelines, render_instructions,
};
pub use session::{ConversationService, GREETING};
pub use tools::{RecordTools, ToolError};
pub use turn::{DEFAULT_MAX_HANDOFF_CHAIN, TurnController, TurnSettings};
