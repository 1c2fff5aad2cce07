use crate::domain::ObservationState;
use crate::foundation::now_nanos;
use log::trace;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handle to one record; the mutex is the per-record lock.
pub type ObservationStateHandle = Arc<Mutex<ObservationState>>;

/// Concurrent map from hex(signing digest) to observation state.
///
/// The map lock only guards membership. It is never held while a record lock is taken, so callers
/// may lock a record returned from here without any lock-ordering concerns, as long as they never
/// hold two record locks at once.
#[derive(Default)]
pub struct ObservationStore {
    states: RwLock<HashMap<String, ObservationStateHandle>>,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `key`, creating an empty one if needed.
    ///
    /// Exactly one of any number of racing first-time callers observes `created == true`; all of
    /// them receive the same record.
    pub fn get_or_create(&self, key: &str) -> (ObservationStateHandle, bool) {
        if let Some(existing) = self.states.read().get(key) {
            return (existing.clone(), false);
        }

        let mut states = self.states.write();
        if let Some(existing) = states.get(key) {
            return (existing.clone(), false);
        }
        let handle = Arc::new(Mutex::new(ObservationState::new(now_nanos())));
        states.insert(key.to_string(), handle.clone());
        trace!("observation state created key={} total={}", key, states.len());
        (handle, true)
    }

    pub fn get(&self, key: &str) -> Option<ObservationStateHandle> {
        self.states.read().get(key).cloned()
    }

    /// Removes the record; holders of the returned handle may keep using it.
    pub fn remove(&self, key: &str) -> Option<ObservationStateHandle> {
        self.states.write().remove(key)
    }

    /// Removes `key` only while it still maps to `handle`, so a record recreated after a snapshot
    /// survives a stale removal.
    pub fn remove_if_same(&self, key: &str, handle: &ObservationStateHandle) -> bool {
        let mut states = self.states.write();
        match states.get(key) {
            Some(current) if Arc::ptr_eq(current, handle) => {
                states.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }

    /// Point-in-time list of all records, for sweeps that lock records one at a time.
    pub fn snapshot(&self) -> Vec<(String, ObservationStateHandle)> {
        self.states.read().iter().map(|(key, handle)| (key.clone(), handle.clone())).collect()
    }
}
