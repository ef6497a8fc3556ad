//! Record tools exposed to participants.
//!
//! Tool failures never abort a turn. They are reported back to the
//! participant as text beginning with `Error:` so it can react in
//! conversation.

use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::conversation::domain::ToolKind;
use crate::conversation::ports::record_store::{
    NewPlayerRecord, RecordId, RecordStore, RecordStoreError,
};

/// Reasons a tool call failed.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The tool name is not recognised.
    #[error("Unknown tool '{0}'.")]
    UnknownTool(String),

    /// The arguments did not match the tool's schema.
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments {
        /// Tool that was called.
        tool: ToolKind,
        /// Decode failure.
        reason: String,
    },

    /// `write_name_to_db` was called with a blank name.
    #[error("Cannot write empty name to database.")]
    EmptyName,

    /// The player record could not be created.
    #[error("Failed to write player '{full_name}' to the database. Details: {source}")]
    WriteFailed {
        /// Name being written.
        full_name: String,
        /// Store failure.
        #[source]
        source: RecordStoreError,
    },

    /// The email could not be stored.
    #[error("Failed to update record {record_id} with email {email}. Details: {source}")]
    UpdateFailed {
        /// Target record.
        record_id: RecordId,
        /// Email being written.
        email: String,
        /// Store failure.
        #[source]
        source: RecordStoreError,
    },
}

#[derive(Deserialize)]
struct WriteNameArgs {
    full_name: String,
}

#[derive(Deserialize)]
struct UpdateEmailArgs {
    record_id: String,
    email: String,
}

/// Executes record tools against a [`RecordStore`].
pub struct RecordTools<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> Clone for RecordTools<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> RecordTools<S> {
    /// Creates tools backed by `store`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Executes a tool call by name with JSON-encoded arguments and returns
    /// the text result handed back to the participant.
    pub async fn execute(&self, tool_name: &str, arguments: &str) -> String {
        let result = match ToolKind::try_from(tool_name) {
            Ok(tool) => self.dispatch(tool, arguments).await,
            Err(_) => Err(ToolError::UnknownTool(tool_name.to_owned())),
        };
        result.unwrap_or_else(|err| {
            warn!(tool = tool_name, error = %err, "record tool failed");
            format!("Error: {err}")
        })
    }

    async fn dispatch(&self, tool: ToolKind, arguments: &str) -> Result<String, ToolError> {
        match tool {
            ToolKind::WriteNameToDb => {
                let args: WriteNameArgs = decode_arguments(tool, arguments)?;
                self.write_name(&args.full_name).await
            }
            ToolKind::UpdateEmailInDb => {
                let args: UpdateEmailArgs = decode_arguments(tool, arguments)?;
                self.update_email(&RecordId::new(args.record_id), &args.email)
                    .await
            }
        }
    }

    /// Splits `full_name` into first and last names and creates a player
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::EmptyName`] for a blank name, or
    /// [`ToolError::WriteFailed`] when the store rejects the record.
    pub async fn write_name(&self, full_name: &str) -> Result<String, ToolError> {
        let record = split_full_name(full_name).ok_or(ToolError::EmptyName)?;
        let record_id = self
            .store
            .create_player(&record)
            .await
            .map_err(|source| ToolError::WriteFailed {
                full_name: full_name.to_owned(),
                source,
            })?;
        info!(record_id = %record_id, "player record created");
        Ok(format!(
            "Successfully wrote player '{full_name}' to the database. Record ID: {record_id}"
        ))
    }

    /// Sets the contact email of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UpdateFailed`] when the store rejects the update.
    pub async fn update_email(
        &self,
        record_id: &RecordId,
        email: &str,
    ) -> Result<String, ToolError> {
        self.store
            .update_email(record_id, email)
            .await
            .map_err(|source| ToolError::UpdateFailed {
                record_id: record_id.clone(),
                email: email.to_owned(),
                source,
            })?;
        info!(record_id = %record_id, "player email updated");
        Ok(format!(
            "Successfully updated record {record_id} with email {email}."
        ))
    }
}

fn decode_arguments<T: for<'de> Deserialize<'de>>(
    tool: ToolKind,
    arguments: &str,
) -> Result<T, ToolError> {
    serde_json::from_str(arguments).map_err(|err| ToolError::InvalidArguments {
        tool,
        reason: err.to_string(),
    })
}

fn split_full_name(full_name: &str) -> Option<NewPlayerRecord> {
    let mut words = full_name.split_whitespace();
    let first_name = words.next()?.to_owned();
    let last_name = words.collect::<Vec<_>>().join(" ");
    Some(NewPlayerRecord {
        first_name,
        last_name,
        full_name: full_name.to_owned(),
    })
}
