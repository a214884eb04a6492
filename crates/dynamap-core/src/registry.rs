//! Entity metadata registry.
//!
//! Mapper runtimes register every entity's metadata table once at startup,
//! then look tables up per translation call, usually from many threads at
//! once. The registry hands out `Arc`s, so a translation call never holds a
//! registry lock while it runs.

use std::sync::Arc;

use dashmap::DashMap;

use dynamap_model::EntityMetadata;

/// Errors raised by the metadata registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Metadata for this entity name is already registered.
    #[error("entity already registered: {entity_name}")]
    AlreadyRegistered {
        /// The duplicated entity name.
        entity_name: String,
    },

    /// No metadata is registered under this entity name.
    #[error("no metadata registered for entity: {entity_name}")]
    UnknownEntity {
        /// The unknown entity name.
        entity_name: String,
    },
}

/// Thread-safe entity-name → metadata lookup.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    entities: DashMap<String, Arc<EntityMetadata>>,
}

impl MetadataRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one entity's metadata. Returns an error if the entity name
    /// is already taken.
    pub fn register(
        &self,
        metadata: EntityMetadata,
    ) -> Result<Arc<EntityMetadata>, RegistryError> {
        let name = metadata.entity_name().to_owned();
        // Entry API keeps check + insert atomic.
        match self.entities.entry(name) {
            dashmap::mapref::entry::Entry::Occupied(e) => Err(RegistryError::AlreadyRegistered {
                entity_name: e.key().clone(),
            }),
            dashmap::mapref::entry::Entry::Vacant(e) => {
                let metadata = Arc::new(metadata);
                e.insert(Arc::clone(&metadata));
                Ok(metadata)
            }
        }
    }

    /// Get an entity's metadata by name.
    #[must_use]
    pub fn get(&self, entity_name: &str) -> Option<Arc<EntityMetadata>> {
        self.entities
            .get(entity_name)
            .map(|r| Arc::clone(r.value()))
    }

    /// Get an entity's metadata or return a typed not-found error.
    pub fn require(&self, entity_name: &str) -> Result<Arc<EntityMetadata>, RegistryError> {
        self.get(entity_name)
            .ok_or_else(|| RegistryError::UnknownEntity {
                entity_name: entity_name.to_owned(),
            })
    }

    /// List all registered entity names (sorted).
    #[must_use]
    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entities.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Remove all registered metadata.
    pub fn reset(&self) {
        self.entities.clear();
    }
}
