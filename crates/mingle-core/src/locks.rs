use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{MingleError, Result};

// Lazily allocated per-key mutex slots behind one registry lock. Different
// keys proceed independently; two holders of the same key are serialized.
// Slots live as long as the registry; the key space (active viewers, active
// pairs) is small enough that nothing is evicted.
pub struct KeyedLocks<K> {
    slots: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> std::fmt::Debug for KeyedLocks<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedLocks").finish_non_exhaustive()
    }
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    pub fn new() -> Self {
        Self::default()
    }

    // The registry lock is released before the caller locks the slot, so
    // unrelated keys never contend.
    pub fn slot(&self, key: &K) -> Result<Arc<Mutex<()>>> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| MingleError::mutex_poisoned("lock registry"))?;
        Ok(Arc::clone(slots.entry(key.clone()).or_default()))
    }
}

pub fn lock_slot<'a>(slot: &'a Arc<Mutex<()>>, what: &str) -> Result<MutexGuard<'a, ()>> {
    slot.lock().map_err(|_| MingleError::mutex_poisoned(what))
}

// Canonical key for an unordered user pair.
pub fn pair_key(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}
