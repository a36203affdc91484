use std::sync::Arc;

use dashmap::DashMap;

use super::StoreEngine;
use crate::{Entity, Result, StoreKey};

/// A volatile [`StoreEngine`] that keeps entities in a concurrent HashMap.
///
/// Clones share the same map. Nothing is written to disk, so all data is lost when the
/// last handle is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entities: Arc<DashMap<StoreKey, Entity>>,
}

impl MemoryStore {
    /// creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// the number of entities currently stored, across all kinds
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// returns `true` if no entity is stored
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl StoreEngine for MemoryStore {
    fn save(&self, key: &StoreKey, entity: &Entity) -> Result<()> {
        self.entities.insert(key.clone(), entity.clone());
        Ok(())
    }

    fn get(&self, key: &StoreKey) -> Result<Option<Entity>> {
        Ok(self.entities.get(key).map(|e| e.value().clone()))
    }

    fn delete(&self, key: &StoreKey) -> Result<()> {
        self.entities.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entities() {
        let store = MemoryStore::new();
        let handle = store.clone();
        let key = StoreKey::new("infinityOne", "a@b.com");
        store
            .save(&key, &Entity::new("1001".into(), "financial".into(), None))
            .unwrap();

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.get(&key).unwrap().unwrap().squareid, "1001");

        handle.delete(&key).unwrap();
        assert!(store.is_empty());
    }
}
