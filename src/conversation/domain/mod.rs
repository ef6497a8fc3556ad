//! Domain types for registration conversations.
//!
//! Everything here is plain data: transcripts, participant definitions, the
//! structured completion signal participants emit, and the per-session state
//! record persisted between turns.

mod context;
mod error;
mod handoff;
mod ids;
mod participant;
mod session;
mod tool;
mod transcript;
mod turn;

pub use context::{CLUB_NAME, InstructionContext, RegistrationContext};
pub use error::{ConversationDomainError, SignalParseError};
pub use handoff::HandoffSignal;
pub use ids::SessionId;
pub use participant::{OutputProtocol, ParticipantDefinition, ParticipantName};
pub use session::SessionState;
pub use tool::ToolKind;
pub use transcript::{Role, Transcript, TranscriptEntry};
pub use turn::{HandoffRecord, Reply, ReplyKind, TurnOutcome, TurnRequest};
