//! Touchline: registration assistant core for a grassroots football club.
//!
//! A registration conversation begins with a code such as
//! `100-Tigers-10-2526`. The code selects the participant that starts the
//! conversation; participants then hand the conversation to one another
//! silently until the registration is complete.
//!
//! # Architecture
//!
//! Touchline follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (language model, record
//!   store, in-memory state)
//!
//! # Modules
//!
//! - [`registration`]: Registration code parsing and validation
//! - [`conversation`]: Participants, handoffs and the turn controller
//! - [`transport`]: HTTP and server-sent-events front end
//! - [`config`]: Environment-driven configuration

pub mod config;
pub mod conversation;
pub mod registration;
pub mod transport;
