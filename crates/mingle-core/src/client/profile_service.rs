use crate::error::{MingleError, Result};
use crate::models::Profile;

use super::Mingle;

impl Mingle {
    pub fn put_profile(&self, profile: &Profile) -> Result<()> {
        profile.validate()?;
        self.state.upsert_profile(profile)?;
        self.write_index()?.upsert(profile);
        Ok(())
    }

    pub fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        self.state.get_profile(user_id)
    }

    pub(super) fn require_profile(&self, user_id: i64) -> Result<Profile> {
        self.state
            .get_profile(user_id)?
            .ok_or_else(|| MingleError::profile_not_found(user_id))
    }

    // Full cascade: edges go with the store transaction, the search
    // document synchronously, and the deleted user's own browsing and
    // session state with them. Ids lingering in other viewers' trackers are
    // tolerated as not found.
    pub fn delete_profile(&self, user_id: i64) -> Result<bool> {
        let existed = self.state.delete_profile(user_id)?;
        self.write_index()?.remove(user_id);
        self.tracker.forget_viewer(user_id)?;
        self.sessions.remove(user_id)?;
        Ok(existed)
    }

    pub fn profile_count(&self) -> Result<usize> {
        self.state.count_profiles()
    }
}
