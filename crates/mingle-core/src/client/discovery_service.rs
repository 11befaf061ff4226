use crate::error::Result;
use crate::locks::lock_slot;
use crate::models::{NextOutcome, Profile};

use super::Mingle;

impl Mingle {
    // The whole step runs inside the viewer's keyed critical section, and
    // the candidate is recorded as viewed before it is returned, so two
    // concurrent calls for one viewer can never deal the same card. On
    // exhaustion the tracker is left untouched.
    pub fn next(&self, viewer: i64) -> Result<NextOutcome> {
        let slot = self.viewer_locks.slot(&viewer)?;
        let _guard = lock_slot(&slot, "viewer")?;

        let mut exclude = self.tracker.viewed(viewer)?;
        exclude.push(viewer);

        match self.state.random_profile_excluding(&exclude)? {
            Some(candidate) => {
                self.tracker.record(viewer, candidate.user_id)?;
                self.tracker.set_current(viewer, candidate.user_id)?;
                Ok(NextOutcome::Candidate(candidate))
            }
            None => Ok(NextOutcome::Exhausted),
        }
    }

    // Ordered by name; ids whose profile has since been deleted drop out.
    pub fn viewed_profiles(&self, viewer: i64) -> Result<Vec<Profile>> {
        let ids = self.tracker.viewed(viewer)?;
        self.state.profiles_by_ids(&ids)
    }

    pub fn clear_viewed(&self, viewer: i64) -> Result<()> {
        let slot = self.viewer_locks.slot(&viewer)?;
        let _guard = lock_slot(&slot, "viewer")?;
        self.tracker.clear(viewer)
    }

    pub fn current_candidate(&self, viewer: i64) -> Result<Option<Profile>> {
        match self.tracker.current(viewer)? {
            Some(id) => self.state.get_profile(id),
            None => Ok(None),
        }
    }
}
