//! Port definitions for the conversation subsystem.

pub mod invoker;
pub mod record_store;
pub mod registry;
pub mod session_store;
