use std::collections::HashMap;

use crate::error::Result;
use crate::models::{Profile, SearchHit};
use crate::search::DEFAULT_QUERY_LIMIT;

use super::Mingle;

impl Mingle {
    // The viewer's own profile is excluded; browsing state is untouched, so
    // search results never count as viewed.
    pub fn search(&self, viewer: i64, text: &str) -> Result<Vec<SearchHit>> {
        let scored = self
            .read_index()?
            .query(text, Some(viewer), DEFAULT_QUERY_LIMIT);
        if scored.is_empty() {
            return Ok(Vec::new());
        }

        // Snapshot fetch doubles as the consistency backstop: a hit whose
        // profile has left the store is dropped rather than surfaced.
        let ids: Vec<i64> = scored.iter().map(|hit| hit.user_id).collect();
        let mut by_id: HashMap<i64, Profile> = self
            .state
            .profiles_by_ids(&ids)?
            .into_iter()
            .map(|profile| (profile.user_id, profile))
            .collect();

        Ok(scored
            .into_iter()
            .filter_map(|hit| {
                by_id.remove(&hit.user_id).map(|profile| SearchHit {
                    profile,
                    score: hit.score,
                })
            })
            .collect())
    }
}
