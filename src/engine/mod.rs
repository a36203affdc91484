//! This module provides the storage engines a [`RecordAdapter`] can delegate to.
//! Two engines are implemented: [`SledStore`], a persistent engine built on top of the
//! [`sled`] embedded database, and [`MemoryStore`], a volatile engine kept in a concurrent
//! HashMap that is mostly useful for tests and throw-away servers.
//!
//! [`RecordAdapter`]: ../struct.RecordAdapter.html
//! [`sled`]: https://docs.rs/sled/latest/sled/
use crate::{Entity, Result, StoreKey};

/// A trait for the minimal set of operations a document style key/value store must offer
pub trait StoreEngine: Clone + Send + Sync + 'static {
    /// saves `entity` at `key`
    ///
    /// If an entity already exists at `key` it is replaced entirely, never merged.
    fn save(&self, key: &StoreKey, entity: &Entity) -> Result<()>;

    /// Gets the entity stored at the given `key`
    ///
    /// Returns `None` if nothing is stored at `key`. A missing entity is not an error at
    /// this level.
    fn get(&self, key: &StoreKey) -> Result<Option<Entity>>;

    /// Deletes the entity stored at `key`.
    ///
    /// Deleting a key that holds nothing succeeds.
    fn delete(&self, key: &StoreKey) -> Result<()>;
}

mod memory;
mod sled;

pub use self::memory::MemoryStore;
pub use self::sled::SledStore;
