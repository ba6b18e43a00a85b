//! In-memory entity storage.
//!
//! One [`EntityStore`] exists per entity kind so unrelated kinds never contend
//! on the same lock. Writers hold the write lock only while touching the map
//! and the id counter; readers clone records out under the read lock, so every
//! returned value is independent of stored state.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{DeckgenError, DeckgenResult};
use crate::types::{Entity, EntityId};

struct StoreInner<T> {
    records: BTreeMap<EntityId, T>,
    next_id: EntityId,
}

/// Concurrency-safe, id-keyed container for one entity kind.
pub struct EntityStore<T: Entity> {
    inner: RwLock<StoreInner<T>>,
}

impl<T: Entity> EntityStore<T> {
    /// Create an empty store whose first identifier will be 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    // Every mutation leaves the map and counter consistent before it can
    // panic, so a poisoned lock still guards valid state.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn not_found(id: EntityId) -> DeckgenError {
        DeckgenError::entity_not_found(T::KIND.label(), id)
    }

    /// Store a new record under the next identifier, ignoring any id it carries.
    pub fn create(&self, mut entity: T) -> T {
        let id = {
            let mut inner = self.write();
            let id = inner.next_id;
            inner.next_id += 1;
            entity.set_id(id);
            inner.records.insert(id, entity.clone());
            id
        };
        debug!(kind = %T::KIND, id, "Entity created");
        entity
    }

    /// Get a copy of the record with the given id.
    pub fn get(&self, id: EntityId) -> DeckgenResult<T> {
        self.read()
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    /// Snapshot of every live record, ascending by id.
    pub fn list(&self) -> Vec<T> {
        self.read().records.values().cloned().collect()
    }

    /// Replace the record stored under `entity.id()`.
    pub fn update(&self, entity: T) -> DeckgenResult<T> {
        let id = entity.id();
        {
            let mut inner = self.write();
            let slot = inner.records.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
            *slot = entity.clone();
        }
        debug!(kind = %T::KIND, id, "Entity updated");
        Ok(entity)
    }

    /// Permanently remove a record. Its id is never handed out again.
    pub fn delete(&self, id: EntityId) -> DeckgenResult<()> {
        self.write()
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))?;
        debug!(kind = %T::KIND, id, "Entity deleted");
        Ok(())
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
