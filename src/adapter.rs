use tracing::{debug, error};

use crate::command::{KeyRequest, UpsertRequest};
use crate::{Entity, Result, SquaresError, StoreEngine};

/// Translates upsert, get and delete requests into a single call on a [`StoreEngine`].
///
/// The adapter holds nothing but a handle to its engine. It is cloned into every request and
/// keeps no state between requests.
///
/// # Example
/// ```rust
/// use squares::{KeyRequest, MemoryStore, RecordAdapter, UpsertRequest};
/// # fn main() -> squares::Result<()> {
/// let adapter = RecordAdapter::new(MemoryStore::new());
/// let target = KeyRequest::new("infinityOne", "a@b.com");
/// let msg = adapter.upsert(UpsertRequest::new(target.clone(), "1001", "financial", None))?;
/// assert_eq!(msg, "Entity infinityOne/a@b.com saved.");
/// let entity = adapter.get(&target)?;
/// assert_eq!(entity.squareid, "1001");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecordAdapter<E: StoreEngine> {
    engine: E,
}

impl<E: StoreEngine> RecordAdapter<E> {
    /// Create a new `RecordAdapter` over the given [`StoreEngine`]
    pub fn new(engine: E) -> Self {
        RecordAdapter { engine }
    }

    /// the engine this adapter delegates to
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// creates or fully replaces the entity addressed by `req`, stamping it with the current
    /// time.
    ///
    /// # Returns
    /// a confirmation naming the key path, e.g. `Entity infinityOne/a@b.com saved.`
    /// # Errors
    /// [`SquaresError::MissingField`] if `squareid`, `squaretype`, `key` or `kind` is missing,
    /// checked in that order, before the engine is called. Engine errors are returned as is.
    pub fn upsert(&self, req: UpsertRequest) -> Result<String> {
        logged("upsert", self.try_upsert(req))
    }

    /// retrieves the entity addressed by `req`
    ///
    /// # Errors
    /// [`SquaresError::NotFound`] if the engine has nothing stored at the key,
    /// [`SquaresError::MissingField`] if `key` or `kind` is missing.
    pub fn get(&self, req: &KeyRequest) -> Result<Entity> {
        logged("get", self.try_get(req))
    }

    /// deletes the entity addressed by `req`. Deleting a key that holds nothing succeeds.
    ///
    /// # Returns
    /// a confirmation naming the key path, e.g. `Entity infinityOne/a@b.com deleted.`
    pub fn delete(&self, req: &KeyRequest) -> Result<String> {
        logged("delete", self.try_delete(req))
    }

    fn try_upsert(&self, req: UpsertRequest) -> Result<String> {
        let (squareid, squaretype) = req
            .square()
            .map(|(id, ty)| (id.to_owned(), ty.to_owned()))?;
        let key = req.target.store_key()?;
        let entity = Entity::new(squareid, squaretype, req.description);

        self.engine.save(&key, &entity)?;
        debug!("saved {}: {:?}", key, entity);
        Ok(format!("Entity {} saved.", key.path()))
    }

    fn try_get(&self, req: &KeyRequest) -> Result<Entity> {
        let key = req.store_key()?;
        match self.engine.get(&key)? {
            Some(entity) => Ok(entity),
            None => Err(SquaresError::NotFound(key.path())),
        }
    }

    fn try_delete(&self, req: &KeyRequest) -> Result<String> {
        let key = req.store_key()?;
        self.engine.delete(&key)?;
        Ok(format!("Entity {} deleted.", key.path()))
    }
}

/// logs a failed operation before it is reported to the caller
fn logged<T>(op: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        if e.is_store_error() {
            error!("{} failed in the store engine: {}", op, e);
        } else {
            error!("{} failed: {}", op, e);
        }
    }
    result
}
