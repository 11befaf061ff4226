use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{MingleError, Result};
use crate::locks::KeyedLocks;
use crate::search::SearchIndex;
use crate::session::SessionMap;
use crate::state::SqliteStore;
use crate::tracker::ViewTracker;

mod discovery_service;
mod match_service;
mod profile_service;
mod search_service;

pub const STATE_DB_FILE: &str = "mingle.sqlite3";

// The engine handle a transport holds. Clones share all state.
#[derive(Clone)]
pub struct Mingle {
    pub state: SqliteStore,
    pub tracker: ViewTracker,
    pub sessions: SessionMap,
    index: Arc<RwLock<SearchIndex>>,
    viewer_locks: Arc<KeyedLocks<i64>>,
    pair_locks: Arc<KeyedLocks<(i64, i64)>>,
}

impl std::fmt::Debug for Mingle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mingle").finish_non_exhaustive()
    }
}

impl Mingle {
    pub fn open(root_dir: impl Into<PathBuf>) -> Result<Self> {
        let root = root_dir.into();
        fs::create_dir_all(&root)?;
        let state = SqliteStore::open(root.join(STATE_DB_FILE))?;
        Self::from_state(state)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        Self::from_state(SqliteStore::open_in_memory()?)
    }

    fn from_state(state: SqliteStore) -> Result<Self> {
        let engine = Self {
            state,
            tracker: ViewTracker::new(),
            sessions: SessionMap::new(),
            index: Arc::new(RwLock::new(SearchIndex::new())),
            viewer_locks: Arc::new(KeyedLocks::new()),
            pair_locks: Arc::new(KeyedLocks::new()),
        };
        engine.rebuild_index()?;
        Ok(engine)
    }

    // Runs at startup; afterwards the index is maintained incrementally.
    pub fn rebuild_index(&self) -> Result<()> {
        let profiles = self.state.all_profiles()?;
        let mut index = self.write_index()?;
        index.clear();
        for profile in &profiles {
            index.upsert(profile);
        }
        Ok(())
    }

    fn read_index(&self) -> Result<RwLockReadGuard<'_, SearchIndex>> {
        self.index
            .read()
            .map_err(|_| MingleError::mutex_poisoned("search index"))
    }

    fn write_index(&self) -> Result<RwLockWriteGuard<'_, SearchIndex>> {
        self.index
            .write()
            .map_err(|_| MingleError::mutex_poisoned("search index"))
    }
}

#[cfg(test)]
mod tests;
