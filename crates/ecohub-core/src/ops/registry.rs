use std::collections::BTreeMap;

use super::collection::Collection;
use crate::errors::Result;
use crate::model::EntityKind;

/// One collection per entity type
///
/// Built explicitly at start-up and handed to whatever needs it; there is no
/// process-global state.
#[derive(Debug, Clone)]
pub struct Registry {
    collections: BTreeMap<EntityKind, Collection>,
}

impl Registry {
    /// A registry with an empty collection for every entity type
    pub fn new() -> Self {
        Self {
            collections: EntityKind::ALL
                .into_iter()
                .map(|kind| (kind, Collection::new(kind.name())))
                .collect(),
        }
    }

    pub fn collection(&self, kind: EntityKind) -> &Collection {
        // Every kind is inserted by `new` and never removed
        &self.collections[&kind]
    }

    pub fn collection_mut(&mut self, kind: EntityKind) -> &mut Collection {
        self.collections
            .entry(kind)
            .or_insert_with(|| Collection::new(kind.name()))
    }

    /// Look up a collection by entity name (see `EntityKind::from_str`)
    ///
    /// # Errors
    ///
    /// Returns `UnknownEntity` if the name matches no entity type.
    pub fn by_name(&self, name: &str) -> Result<&Collection> {
        let kind: EntityKind = name.parse()?;
        Ok(self.collection(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &Collection)> {
        self.collections.iter().map(|(kind, c)| (*kind, c))
    }

    pub fn total_records(&self) -> usize {
        self.collections.values().map(Collection::len).sum()
    }

    /// Split into per-kind collections, e.g. to hand each to its own lock
    pub fn into_collections(self) -> impl Iterator<Item = (EntityKind, Collection)> {
        self.collections.into_iter()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EcoHubError;
    use crate::model::Fields;

    #[test]
    fn test_registry_has_every_kind() {
        let registry = Registry::new();
        assert_eq!(registry.iter().count(), EntityKind::ALL.len());
        for kind in EntityKind::ALL {
            assert_eq!(registry.collection(kind).name(), kind.name());
        }
    }

    #[test]
    fn test_collections_are_independent() {
        let mut registry = Registry::new();
        registry
            .collection_mut(EntityKind::Challenge)
            .create(Fields::new());
        let fact = registry
            .collection_mut(EntityKind::DailyFact)
            .create(Fields::new());

        // Each collection has its own id counter
        assert_eq!(fact.id().get(), 1);
        assert_eq!(registry.total_records(), 2);
    }

    #[test]
    fn test_by_name() {
        let registry = Registry::new();
        assert_eq!(registry.by_name("daily_fact").unwrap().name(), "DailyFact");
        assert!(matches!(
            registry.by_name("Leaderboard"),
            Err(EcoHubError::UnknownEntity { .. })
        ));
    }
}
