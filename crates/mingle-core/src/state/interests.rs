use chrono::Utc;
use rusqlite::params;

use crate::error::Result;

use super::{SqliteStore, i64_to_usize_saturating};

impl SqliteStore {
    // Returns whether a new edge was written; re-asserting is a no-op.
    // Self-edge rejection lives above the store, with the error taxonomy.
    pub fn add_interest(&self, from_id: i64, to_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                r"
                INSERT OR IGNORE INTO interests(from_id, to_id, created_at)
                VALUES (?1, ?2, ?3)
                ",
                params![from_id, to_id, Utc::now().to_rfc3339()],
            )?;
            Ok(affected > 0)
        })
    }

    pub fn has_interest(&self, from_id: i64, to_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM interests WHERE from_id = ?1 AND to_id = ?2)",
                params![from_id, to_id],
                |row| row.get::<_, i64>(0),
            )?;
            Ok(found != 0)
        })
    }

    // One statement for both directions: the answer is a single snapshot of
    // the edge set, never a half-visible insert.
    pub fn is_mutual(&self, a: i64, b: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let mutual = conn.query_row(
                r"
                SELECT EXISTS(SELECT 1 FROM interests WHERE from_id = ?1 AND to_id = ?2)
                   AND EXISTS(SELECT 1 FROM interests WHERE from_id = ?2 AND to_id = ?1)
                ",
                params![a, b],
                |row| row.get::<_, i64>(0),
            )?;
            Ok(mutual != 0)
        })
    }

    // Every edge touching the id, in either direction.
    pub fn purge_interests(&self, user_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM interests WHERE from_id = ?1 OR to_id = ?1",
                params![user_id],
            )?;
            Ok(affected)
        })
    }

    pub fn count_interests(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count =
                conn.query_row("SELECT COUNT(*) FROM interests", [], |row| row.get::<_, i64>(0))?;
            Ok(i64_to_usize_saturating(count))
        })
    }
}
