//! In-memory participant registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::conversation::domain::{ParticipantDefinition, ParticipantName};
use crate::conversation::ports::registry::{ParticipantRegistry, RegistryError, RegistryResult};

use super::participants::canonical_participants;

/// Immutable registry built once at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryParticipantRegistry {
    participants: BTreeMap<ParticipantName, Arc<ParticipantDefinition>>,
}

impl InMemoryParticipantRegistry {
    /// Builds a registry from definitions.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateParticipant`] when two definitions
    /// share a name, or [`RegistryError::UnknownHandoffTarget`] when a
    /// definition hands off to a participant that is not in the set.
    pub fn new(
        definitions: impl IntoIterator<Item = ParticipantDefinition>,
    ) -> RegistryResult<Self> {
        let mut participants = BTreeMap::new();
        for definition in definitions {
            let name = definition.name().clone();
            if participants.contains_key(&name) {
                return Err(RegistryError::DuplicateParticipant(name));
            }
            participants.insert(name, Arc::new(definition));
        }

        for definition in participants.values() {
            if let Some(missing) = definition
                .handoffs()
                .iter()
                .find(|target| !participants.contains_key(*target))
            {
                return Err(RegistryError::UnknownHandoffTarget {
                    from: definition.name().clone(),
                    to: missing.clone(),
                });
            }
        }

        Ok(Self { participants })
    }

    /// Builds the registry of built-in club participants.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::new`] validation failures.
    pub fn canonical() -> RegistryResult<Self> {
        Self::new(canonical_participants()?)
    }

    /// Returns the number of registered participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns `true` if no participants are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl ParticipantRegistry for InMemoryParticipantRegistry {
    fn find(&self, name: &ParticipantName) -> Option<Arc<ParticipantDefinition>> {
        self.participants.get(name).cloned()
    }

    fn names(&self) -> Vec<ParticipantName> {
        self.participants.keys().cloned().collect()
    }
}
