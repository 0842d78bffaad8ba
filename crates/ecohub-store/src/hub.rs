//! Entity hub: one `MemoryStore` per entity type
//!
//! The hub is an explicit context object. It is built once at start-up
//! (empty, or from an imported `Registry`) and then passed around by
//! reference or clone; there is no global instance.

use std::collections::BTreeMap;
use std::sync::Arc;

use ecohub_core::errors::ExError;
use ecohub_core::{EntityKind, Registry};

use crate::errors::Result;
use crate::memory::MemoryStore;
use crate::record_store::RecordStore;

#[derive(Debug, Clone)]
pub struct EntityHub {
    stores: Arc<BTreeMap<EntityKind, MemoryStore>>,
}

impl EntityHub {
    /// A hub with an empty store for every entity type
    pub fn new() -> Self {
        Self::from_registry(Registry::new())
    }

    /// Hand each collection of `registry` to its own store
    pub fn from_registry(registry: Registry) -> Self {
        let mut collections: BTreeMap<_, _> = registry.into_collections().collect();
        let stores = EntityKind::ALL
            .into_iter()
            .map(|kind| {
                let store = match collections.remove(&kind) {
                    Some(collection) => MemoryStore::from_collection(collection),
                    None => MemoryStore::new(kind.name()),
                };
                (kind, store)
            })
            .collect();

        Self {
            stores: Arc::new(stores),
        }
    }

    pub fn store(&self, kind: EntityKind) -> &MemoryStore {
        // `from_registry` inserts every kind
        &self.stores[&kind]
    }

    /// Look up a store by entity name, case-insensitively
    ///
    /// # Errors
    ///
    /// Returns an `ERR_UNKNOWN_ENTITY` error listing the valid names.
    pub fn by_name(&self, name: &str) -> Result<&MemoryStore> {
        let kind: EntityKind = name
            .parse()
            .map_err(|e| ExError::from(e).with_op("hub_lookup"))?;
        Ok(self.store(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &MemoryStore)> {
        self.stores.iter().map(|(kind, store)| (*kind, store))
    }

    /// Record count per entity type, in `EntityKind::ALL` order
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn counts(&self) -> Result<Vec<(EntityKind, usize)>> {
        let mut counts = Vec::with_capacity(self.stores.len());
        for (kind, store) in self.iter() {
            counts.push((kind, store.len().await?));
        }
        Ok(counts)
    }
}

impl Default for EntityHub {
    fn default() -> Self {
        Self::new()
    }
}
