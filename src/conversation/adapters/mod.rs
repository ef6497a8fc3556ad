//! Adapters for the conversation ports.
//!
//! - [`memory`]: in-process implementations used by tests and by the server
//!   when no external record store is configured
//! - [`openai::OpenAiInvoker`]: runs participants on an OpenAI-compatible
//!   chat-completions API
//! - [`airtable::AirtableRecordStore`]: player records in an Airtable table

pub mod airtable;
pub mod memory;
pub mod openai;
