use std::path::Path;

use tracing::{debug, info, instrument};

use super::StoreEngine;
use crate::{Entity, Result, StoreKey};

// kinds live in their own trees; the prefix keeps them clear of sled's default tree
const KIND_TREE_PREFIX: &str = "kind/";

/// A [`StoreEngine`] that persists entities in a [`sled`] database.
///
/// Each kind is kept in its own sled `Tree`, keyed by the entity key. Values are the JSON
/// encoding of the [`Entity`]. Every write is flushed to disk before it is acknowledged.
///
/// `SledStore` is a cheap handle: cloning it shares the same underlying database.
///
/// [`sled`]: https://docs.rs/sled/latest/sled/
#[derive(Debug, Clone)]
pub struct SledStore {
    db: ::sled::Db,
}

impl SledStore {
    /// opens (or creates) a sled database in the given `working_dir`
    #[instrument]
    pub fn open(working_dir: &Path) -> Result<SledStore> {
        info!("opening sled engine in {:?}", working_dir);
        let db = ::sled::open(working_dir)?;
        Ok(SledStore { db })
    }

    /// wraps an already opened sled database
    pub fn new(db: ::sled::Db) -> Self {
        SledStore { db }
    }

    /// opens the tree of `kind`, creating it if this kind was never written
    fn tree(&self, kind: &str) -> Result<::sled::Tree> {
        Ok(self.db.open_tree(tree_name(kind))?)
    }

    /// opens the tree of `kind` only if it already exists, so reads never create trees
    fn existing_tree(&self, kind: &str) -> Result<Option<::sled::Tree>> {
        let name = tree_name(kind);
        if self
            .db
            .tree_names()
            .iter()
            .any(|existing| &**existing == name.as_bytes())
        {
            Ok(Some(self.db.open_tree(name)?))
        } else {
            Ok(None)
        }
    }
}

fn tree_name(kind: &str) -> String {
    format!("{}{}", KIND_TREE_PREFIX, kind)
}

impl StoreEngine for SledStore {
    fn save(&self, key: &StoreKey, entity: &Entity) -> Result<()> {
        let tree = self.tree(key.kind())?;
        tree.insert(key.name().as_bytes(), serde_json::to_vec(entity)?)?;
        tree.flush()?;
        debug!("saved {}", key);
        Ok(())
    }

    fn get(&self, key: &StoreKey) -> Result<Option<Entity>> {
        let tree = match self.existing_tree(key.kind())? {
            Some(tree) => tree,
            None => return Ok(None),
        };
        match tree.get(key.name().as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, key: &StoreKey) -> Result<()> {
        let tree = match self.existing_tree(key.kind())? {
            Some(tree) => tree,
            None => return Ok(()),
        };
        tree.remove(key.name().as_bytes())?;
        tree.flush()?;
        debug!("deleted {}", key);
        Ok(())
    }
}
