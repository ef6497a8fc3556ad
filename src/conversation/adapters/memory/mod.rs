//! In-memory adapter implementations.
//!
//! Thread-safe and dependency-free. The participant registry is the
//! canonical one used in production; the stores and the scripted invoker are
//! meant for tests and local runs.

mod participants;
mod record_store;
mod registry;
mod scripted_invoker;
mod session_store;

pub use participants::{
    CONTACT_DETAILS_AGENT, NEW_REGISTRATION_AGENT, RENEW_REGISTRATION_AGENT, canonical_participants,
};
pub use record_store::{InMemoryRecordStore, StoredPlayer};
pub use registry::InMemoryParticipantRegistry;
pub use scripted_invoker::{RecordedInvocation, ScriptedInvoker};
pub use session_store::InMemorySessionStore;
