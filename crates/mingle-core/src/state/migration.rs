use crate::error::{MingleError, Result};

use super::SqliteStore;

const MIGRATION_SCHEMA_SQL: &str = r"
    PRAGMA journal_mode = WAL;
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS profiles (
        user_id    INTEGER PRIMARY KEY,
        name       TEXT NOT NULL,
        branch     TEXT NOT NULL,
        role       TEXT NOT NULL,
        about      TEXT NOT NULL,
        photo_ref  TEXT,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS interests (
        from_id    INTEGER NOT NULL,
        to_id      INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        PRIMARY KEY (from_id, to_id)
    );

    CREATE INDEX IF NOT EXISTS idx_profiles_name ON profiles(name);
    CREATE INDEX IF NOT EXISTS idx_interests_to_id ON interests(to_id);
";

impl SqliteStore {
    pub fn migrate(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| MingleError::mutex_poisoned("sqlite"))?;
        conn.execute_batch(MIGRATION_SCHEMA_SQL)?;
        drop(conn);
        Ok(())
    }
}
