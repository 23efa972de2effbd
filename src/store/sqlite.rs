//! SQLite progress store
//!
//! One row per user; the record itself is a JSON column, with xp and level
//! mirrored into plain columns for ordering and ad-hoc queries.

use super::ProgressStore;
use crate::data::{PlayerProgress, UserId};
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let conn = Connection::open(path).with_context(|| format!("Failed to open database: {:?}", path))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: path.to_path_buf(),
        };
        store.init_schema()?;
        debug!(path = ?path, "progress database ready");
        Ok(store)
    }

    /// Private database, gone when dropped
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(Connection::open_in_memory()?)),
            db_path: PathBuf::from(":memory:"),
        };
        store.init_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| anyhow!("database lock poisoned"))
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS player_progress (
                user_id INTEGER PRIMARY KEY,
                xp INTEGER NOT NULL,
                level INTEGER NOT NULL,
                progress TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_progress_xp ON player_progress(xp DESC)",
            [],
        )?;
        Ok(())
    }

    fn decode(user_id: UserId, json: &str) -> Result<PlayerProgress> {
        let progress: PlayerProgress = serde_json::from_str(json)
            .with_context(|| format!("Corrupt progress record for user {}", user_id))?;
        Ok(progress.normalized())
    }

    /// SQLite integers are signed
    fn stored_xp(progress: &PlayerProgress) -> Result<i64> {
        i64::try_from(progress.xp()).with_context(|| format!("xp {} exceeds storage range", progress.xp()))
    }
}

impl ProgressStore for SqliteStore {
    fn create(&self, user_id: UserId, progress: &PlayerProgress) -> Result<bool> {
        let xp = Self::stored_xp(progress)?;
        let json = serde_json::to_string(progress)?;
        let inserted = self.conn()?.execute(
            "INSERT OR IGNORE INTO player_progress (user_id, xp, level, progress, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, xp, progress.level(), json, Utc::now().to_rfc3339()],
        )?;
        Ok(inserted == 1)
    }

    fn load(&self, user_id: UserId) -> Result<Option<PlayerProgress>> {
        let json: Option<String> = self
            .conn()?
            .query_row(
                "SELECT progress FROM player_progress WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        json.map(|json| Self::decode(user_id, &json)).transpose()
    }

    fn save(&self, user_id: UserId, progress: &PlayerProgress) -> Result<()> {
        let xp = Self::stored_xp(progress)?;
        let json = serde_json::to_string(progress)?;
        let updated = self.conn()?.execute(
            "UPDATE player_progress SET xp = ?2, level = ?3, progress = ?4, updated_at = ?5
             WHERE user_id = ?1",
            params![user_id, xp, progress.level(), json, Utc::now().to_rfc3339()],
        )?;
        if updated == 0 {
            bail!("no progress record for user {}", user_id);
        }
        Ok(())
    }

    /// Rows that fail to decode are logged and left out
    fn all(&self) -> Result<Vec<(UserId, PlayerProgress)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT user_id, progress FROM player_progress ORDER BY user_id")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, UserId>(0)?, row.get::<_, String>(1)?)))?;

        let mut records = Vec::new();
        for row in rows {
            let (user_id, json) = row?;
            match Self::decode(user_id, &json) {
                Ok(progress) => records.push((user_id, progress)),
                Err(err) => warn!(user = user_id, "skipping progress record: {:#}", err),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::achievements::Achievement;
    use tempfile::tempdir;

    #[test]
    fn round_trips_a_full_record() {
        let store = SqliteStore::in_memory().unwrap();
        let mut progress = PlayerProgress::new();
        progress.set_xp(1_234);
        progress.mark_completed(3);
        progress.record_score(3, 91);
        progress.record_attempt(3);
        progress.unlock_achievement(Achievement::FirstMission);
        progress.codename = Some("Kestrel".to_string());

        assert!(store.create(42, &PlayerProgress::new()).unwrap());
        store.save(42, &progress).unwrap();
        assert_eq!(store.load(42).unwrap(), Some(progress));
    }

    #[test]
    fn corrupt_rows_are_left_out_of_listing() {
        let store = SqliteStore::in_memory().unwrap();
        store.create(1, &PlayerProgress::new()).unwrap();
        store.create(3, &PlayerProgress::new()).unwrap();
        store
            .conn()
            .unwrap()
            .execute(
                "INSERT INTO player_progress (user_id, xp, level, progress, updated_at)
                 VALUES (2, 0, 1, '{not json', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let ids: Vec<UserId> = store.all().unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 3]);
        // direct loads still surface the damage
        assert!(store.load(2).is_err());
    }

    #[test]
    fn xp_beyond_signed_range_is_refused() {
        let store = SqliteStore::in_memory().unwrap();
        let mut progress = PlayerProgress::new();
        progress.set_xp(i64::MAX as u64 + 1);
        assert!(store.create(7, &progress).is_err());

        store.create(7, &PlayerProgress::new()).unwrap();
        assert!(store.save(7, &progress).is_err());
        assert_eq!(store.load(7).unwrap(), Some(PlayerProgress::new()));

        progress.set_xp(i64::MAX as u64);
        store.save(7, &progress).unwrap();
        assert_eq!(store.load(7).unwrap().unwrap().xp(), i64::MAX as u64);
    }

    #[test]
    fn save_without_record_fails() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.save(1, &PlayerProgress::new()).is_err());
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            let mut progress = PlayerProgress::new();
            progress.set_xp(900);
            store.create(5, &progress).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        let progress = store.load(5).unwrap().unwrap();
        assert_eq!(progress.xp(), 900);
        assert_eq!(progress.level(), 4);
        assert_eq!(store.path(), path.as_path());
    }
}
