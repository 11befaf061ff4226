use chrono::Utc;
use rusqlite::{OptionalExtension, Row, params, params_from_iter, types::Type};

use crate::error::Result;
use crate::models::Profile;

use super::{SqliteStore, i64_to_usize_saturating};

const PROFILE_COLUMNS: &str = "user_id, name, branch, role, about, photo_ref, created_at";

impl SqliteStore {
    // Full-row upsert; last write wins, no partial-field merge at this layer.
    pub fn upsert_profile(&self, profile: &Profile) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                r"
                INSERT INTO profiles(user_id, name, branch, role, about, photo_ref, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(user_id) DO UPDATE SET
                  name=excluded.name,
                  branch=excluded.branch,
                  role=excluded.role,
                  about=excluded.about,
                  photo_ref=excluded.photo_ref,
                  created_at=excluded.created_at
                ",
                params![
                    profile.user_id,
                    profile.name.as_str(),
                    profile.branch.as_str(),
                    profile.role.as_str(),
                    profile.about.as_str(),
                    profile.photo_ref.as_deref(),
                    profile.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ?1"),
                    params![user_id],
                    profile_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    // Edge purge and row delete commit together or not at all.
    pub fn delete_profile(&self, user_id: i64) -> Result<bool> {
        self.with_tx(|tx| {
            tx.execute(
                "DELETE FROM interests WHERE from_id = ?1 OR to_id = ?1",
                params![user_id],
            )?;
            let affected = tx.execute("DELETE FROM profiles WHERE user_id = ?1", params![user_id])?;
            Ok(affected > 0)
        })
    }

    pub fn count_profiles(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count =
                conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get::<_, i64>(0))?;
            Ok(i64_to_usize_saturating(count))
        })
    }

    // Ordered by display name; unknown ids are simply absent from the result.
    pub fn profiles_by_ids(&self, user_ids: &[i64]) -> Result<Vec<Profile>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = placeholder_list(user_ids.len());
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROFILE_COLUMNS} FROM profiles
                 WHERE user_id IN ({placeholders})
                 ORDER BY name ASC, user_id ASC"
            ))?;
            let rows = stmt.query_map(params_from_iter(user_ids.iter()), profile_from_row)?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    // Uniform over every profile not in `exclude`; None when none remain.
    // O(N) scan; the seam to swap for a reservoir sample at larger scale.
    pub fn random_profile_excluding(&self, exclude: &[i64]) -> Result<Option<Profile>> {
        self.with_conn(|conn| {
            let row = if exclude.is_empty() {
                conn.query_row(
                    &format!(
                        "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY RANDOM() LIMIT 1"
                    ),
                    [],
                    profile_from_row,
                )
                .optional()?
            } else {
                let placeholders = placeholder_list(exclude.len());
                conn.query_row(
                    &format!(
                        "SELECT {PROFILE_COLUMNS} FROM profiles
                         WHERE user_id NOT IN ({placeholders})
                         ORDER BY RANDOM() LIMIT 1"
                    ),
                    params_from_iter(exclude.iter()),
                    profile_from_row,
                )
                .optional()?
            };
            Ok(row)
        })
    }

    // Rebuild source for the search index.
    pub fn all_profiles(&self) -> Result<Vec<Profile>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY user_id ASC"
            ))?;
            let rows = stmt.query_map([], profile_from_row)?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    let created_raw = row.get::<_, String>(6)?;
    Ok(Profile {
        user_id: row.get(0)?,
        name: row.get(1)?,
        branch: row.get(2)?,
        role: row.get(3)?,
        about: row.get(4)?,
        photo_ref: row.get(5)?,
        created_at: parse_required_rfc3339(6, &created_raw)?,
    })
}

fn parse_required_rfc3339(idx: usize, raw: &str) -> rusqlite::Result<chrono::DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|x| x.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

pub(super) fn placeholder_list(len: usize) -> String {
    let mut out = String::with_capacity(len * 2);
    for i in 0..len {
        if i > 0 {
            out.push(',');
        }
        out.push('?');
    }
    out
}
