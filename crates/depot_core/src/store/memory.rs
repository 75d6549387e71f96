//! In-memory resource store.
//!
//! # Responsibility
//! - Own the authoritative resource map for process-local deployments.
//! - Keep the case-folded name index in lockstep with the map.
//!
//! # Invariants
//! - Map and name index change together under one lock acquisition, so the
//!   check-and-insert sequence is a single critical section.
//! - Every operation either fully applies or leaves state untouched.

use crate::model::resource::{
    name_key, now_epoch_ms, NewResource, Resource, ResourceId, ResourcePatch,
};
use crate::store::{ResourceStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    items: HashMap<ResourceId, Resource>,
    /// `name_key -> id`, maintained on every write path.
    names: HashMap<String, ResourceId>,
}

/// Mutex-guarded map store; `Send + Sync`, safe to share across request
/// handlers.
#[derive(Default)]
pub struct MemoryResourceStore {
    inner: Mutex<Inner>,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        // A panicked writer still leaves both maps coherent; recover the
        // guard instead of propagating poison.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResourceStore for MemoryResourceStore {
    fn get_all(&self) -> StoreResult<Vec<Resource>> {
        Ok(self.inner().items.values().cloned().collect())
    }

    fn get(&self, id: ResourceId) -> StoreResult<Option<Resource>> {
        Ok(self.inner().items.get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> StoreResult<Option<Resource>> {
        let inner = self.inner();
        Ok(inner
            .names
            .get(&name_key(name))
            .and_then(|id| inner.items.get(id))
            .cloned())
    }

    fn create(&self, draft: NewResource, completed: bool) -> StoreResult<Resource> {
        let mut inner = self.inner();
        let key = name_key(&draft.name);
        if inner.names.contains_key(&key) {
            return Err(StoreError::NameTaken(draft.name));
        }

        let resource = Resource::from_draft(Uuid::new_v4(), draft, completed, now_epoch_ms());
        inner.names.insert(key, resource.id);
        inner.items.insert(resource.id, resource.clone());
        Ok(resource)
    }

    fn update(&self, id: ResourceId, patch: ResourcePatch) -> StoreResult<Option<Resource>> {
        let mut inner = self.inner();
        let Some(existing) = inner.items.get(&id) else {
            return Ok(None);
        };

        let old_key = name_key(&existing.name);
        let new_key = patch.name.as_deref().map(name_key);
        if let Some(key) = &new_key {
            match inner.names.get(key) {
                Some(holder) if *holder != id => {
                    return Err(StoreError::NameTaken(patch.name.unwrap_or_default()));
                }
                _ => {}
            }
        }

        let mut updated = existing.clone();
        updated.apply_patch(patch, now_epoch_ms());

        if let Some(key) = new_key {
            if key != old_key {
                inner.names.remove(&old_key);
                inner.names.insert(key, id);
            }
        }
        inner.items.insert(id, updated.clone());
        Ok(Some(updated))
    }

    fn delete(&self, id: ResourceId) -> StoreResult<bool> {
        let mut inner = self.inner();
        match inner.items.remove(&id) {
            Some(removed) => {
                inner.names.remove(&name_key(&removed.name));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.inner().items.len())
    }
}
