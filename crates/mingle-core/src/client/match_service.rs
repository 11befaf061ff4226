use crate::error::{MingleError, Result};
use crate::locks::{lock_slot, pair_key};
use crate::models::MatchOutcome;

use super::Mingle;

impl Mingle {
    // Opposite-direction inserts for one unordered pair are serialized on
    // the pair's keyed lock, and only the call that writes a new edge may
    // report Matched. Two racing calls produce exactly one match event;
    // re-asserting an edge later (including after a match) is a no-op and
    // reports Pending.
    pub fn record_interest(&self, from: i64, to: i64) -> Result<MatchOutcome> {
        if from == to {
            return Err(MingleError::InvalidEdge(format!(
                "self-interest rejected for user {from}"
            )));
        }

        let slot = self.pair_locks.slot(&pair_key(from, to))?;
        let _guard = lock_slot(&slot, "interest pair")?;

        let from_profile = self.require_profile(from)?;
        let to_profile = self.require_profile(to)?;

        let inserted = self.state.add_interest(from, to)?;
        if inserted && self.state.is_mutual(from, to)? {
            Ok(MatchOutcome::Matched(from_profile, to_profile))
        } else {
            Ok(MatchOutcome::Pending)
        }
    }
}
