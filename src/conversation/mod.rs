//! Registration conversations: participants, handoffs, and turns.
//!
//! # Architecture
//!
//! - **Domain**: transcripts, participant definitions, the completion signal
//!   ([`domain::HandoffSignal`]) and session records
//! - **Ports**: [`ports::invoker::ParticipantInvoker`],
//!   [`ports::registry::ParticipantRegistry`],
//!   [`ports::session_store::SessionStore`] and
//!   [`ports::record_store::RecordStore`]
//! - **Services**: [`services::TurnController`] runs one turn;
//!   [`services::ConversationService`] adds server-held sessions
//! - **Adapters**: in-memory implementations, an `OpenAI` invoker and an
//!   Airtable record store
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use touchline::conversation::adapters::memory::{
//!     InMemoryParticipantRegistry, NEW_REGISTRATION_AGENT, RENEW_REGISTRATION_AGENT,
//!     ScriptedInvoker,
//! };
//! use touchline::conversation::domain::{ParticipantName, TurnRequest};
//! use touchline::conversation::services::{TurnController, TurnSettings};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = Arc::new(InMemoryParticipantRegistry::canonical().expect("registry"));
//! let invoker = Arc::new(ScriptedInvoker::new());
//! let new_registration = ParticipantName::new(NEW_REGISTRATION_AGENT).expect("name");
//! invoker.push_output(
//!     &new_registration,
//!     r#"{"agent_response_text": "Welcome!", "overall_task_complete": false}"#,
//! );
//!
//! let settings = TurnSettings::new(
//!     new_registration.clone(),
//!     ParticipantName::new(RENEW_REGISTRATION_AGENT).expect("name"),
//! );
//! let controller = TurnController::new(registry, invoker, settings);
//!
//! let outcome = controller.run_turn(&TurnRequest::first("100-Tigers-10-2526")).await;
//! assert_eq!(outcome.reply.text, "Welcome!");
//! assert_eq!(outcome.next_participant, Some(new_registration));
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
