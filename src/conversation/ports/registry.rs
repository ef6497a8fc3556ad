//! Port for looking up participant definitions by name.

use std::sync::Arc;
use thiserror::Error;

use crate::conversation::domain::{ConversationDomainError, ParticipantDefinition, ParticipantName};

/// Result type for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Read-only map from participant name to definition.
///
/// Registries are populated at startup and never change afterwards, so
/// lookups are synchronous.
pub trait ParticipantRegistry: Send + Sync {
    /// Finds a participant by name.
    fn find(&self, name: &ParticipantName) -> Option<Arc<ParticipantDefinition>>;

    /// Returns every registered name in a stable order.
    fn names(&self) -> Vec<ParticipantName>;

    /// Returns `true` when `name` is registered.
    fn contains(&self, name: &ParticipantName) -> bool {
        self.find(name).is_some()
    }
}

/// Errors raised while building a registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two definitions share a name.
    #[error("participant '{0}' is registered twice")]
    DuplicateParticipant(ParticipantName),

    /// A definition hands off to a participant that is not registered.
    #[error("participant '{from}' hands off to unregistered participant '{to}'")]
    UnknownHandoffTarget {
        /// Declaring participant.
        from: ParticipantName,
        /// Missing target.
        to: ParticipantName,
    },

    /// A built-in definition has an invalid name.
    #[error("invalid participant definition: {0}")]
    InvalidDefinition(#[from] ConversationDomainError),
}
