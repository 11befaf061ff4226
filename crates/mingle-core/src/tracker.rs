use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::error::{MingleError, Result};

// Per-viewer browsing state: the ordered set of already-shown profile ids
// and the candidate currently on display. Process memory only; a restart
// forgets it. Every read-modify-write cycle runs under the one registry
// lock, so concurrent `record` calls for a viewer cannot lose an entry.
#[derive(Clone, Default)]
pub struct ViewTracker {
    viewers: Arc<Mutex<HashMap<i64, ViewerRecord>>>,
}

#[derive(Debug, Default)]
struct ViewerRecord {
    order: Vec<i64>,
    seen: HashSet<i64>,
    current: Option<i64>,
}

impl std::fmt::Debug for ViewTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewTracker").finish_non_exhaustive()
    }
}

impl ViewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_viewers<T>(&self, f: impl FnOnce(&mut HashMap<i64, ViewerRecord>) -> T) -> Result<T> {
        let mut viewers = self
            .viewers
            .lock()
            .map_err(|_| MingleError::mutex_poisoned("view tracker"))?;
        Ok(f(&mut viewers))
    }

    // Set semantics; first-seen order is retained for display.
    pub fn record(&self, viewer: i64, candidate_id: i64) -> Result<()> {
        self.with_viewers(|viewers| {
            let record = viewers.entry(viewer).or_default();
            if record.seen.insert(candidate_id) {
                record.order.push(candidate_id);
            }
        })
    }

    pub fn viewed(&self, viewer: i64) -> Result<Vec<i64>> {
        self.with_viewers(|viewers| {
            viewers
                .get(&viewer)
                .map(|record| record.order.clone())
                .unwrap_or_default()
        })
    }

    pub fn is_viewed(&self, viewer: i64, candidate_id: i64) -> Result<bool> {
        self.with_viewers(|viewers| {
            viewers
                .get(&viewer)
                .is_some_and(|record| record.seen.contains(&candidate_id))
        })
    }

    pub fn clear(&self, viewer: i64) -> Result<()> {
        self.with_viewers(|viewers| {
            viewers.remove(&viewer);
        })
    }

    pub fn set_current(&self, viewer: i64, candidate_id: i64) -> Result<()> {
        self.with_viewers(|viewers| {
            viewers.entry(viewer).or_default().current = Some(candidate_id);
        })
    }

    pub fn current(&self, viewer: i64) -> Result<Option<i64>> {
        self.with_viewers(|viewers| viewers.get(&viewer).and_then(|record| record.current))
    }

    pub fn take_current(&self, viewer: i64) -> Result<Option<i64>> {
        self.with_viewers(|viewers| {
            viewers
                .get_mut(&viewer)
                .and_then(|record| record.current.take())
        })
    }

    // Drops a deleted profile's own browsing state. Stale references inside
    // other viewers' sets stay; the store reports those as not found.
    pub fn forget_viewer(&self, viewer: i64) -> Result<()> {
        self.clear(viewer)
    }
}
