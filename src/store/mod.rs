//! Progress persistence
//!
//! One record per user. Writes replace the whole record, so two concurrent
//! transactions for the same user are last-writer-wins.

pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::data::{PlayerProgress, UserId};
use anyhow::{anyhow, bail, Result};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Durable per-user progress records
pub trait ProgressStore: Send + Sync {
    /// Insert a record unless one exists; returns true if inserted
    fn create(&self, user_id: UserId, progress: &PlayerProgress) -> Result<bool>;

    fn load(&self, user_id: UserId) -> Result<Option<PlayerProgress>>;

    /// Replace an existing record; errors if the user has none
    fn save(&self, user_id: UserId, progress: &PlayerProgress) -> Result<()>;

    /// Every record, ordered by user id
    fn all(&self) -> Result<Vec<(UserId, PlayerProgress)>>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<UserId, PlayerProgress>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<MutexGuard<'_, BTreeMap<UserId, PlayerProgress>>> {
        self.records
            .lock()
            .map_err(|_| anyhow!("progress store lock poisoned"))
    }
}

impl ProgressStore for MemoryStore {
    fn create(&self, user_id: UserId, progress: &PlayerProgress) -> Result<bool> {
        let mut records = self.records()?;
        if records.contains_key(&user_id) {
            return Ok(false);
        }
        records.insert(user_id, progress.clone());
        Ok(true)
    }

    fn load(&self, user_id: UserId) -> Result<Option<PlayerProgress>> {
        Ok(self.records()?.get(&user_id).cloned())
    }

    fn save(&self, user_id: UserId, progress: &PlayerProgress) -> Result<()> {
        let mut records = self.records()?;
        match records.get_mut(&user_id) {
            Some(record) => {
                *record = progress.clone();
                Ok(())
            }
            None => bail!("no progress record for user {}", user_id),
        }
    }

    fn all(&self) -> Result<Vec<(UserId, PlayerProgress)>> {
        Ok(self
            .records()?
            .iter()
            .map(|(id, progress)| (*id, progress.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_is_insert_if_absent() {
        let store = MemoryStore::new();
        assert!(store.create(7, &PlayerProgress::new()).unwrap());

        let mut changed = PlayerProgress::new();
        changed.set_xp(500);
        assert!(!store.create(7, &changed).unwrap());
        assert_eq!(store.load(7).unwrap().unwrap().xp(), 0);
    }

    #[test]
    fn save_requires_existing_record() {
        let store = MemoryStore::new();
        assert!(store.save(1, &PlayerProgress::new()).is_err());
        assert!(store.load(1).unwrap().is_none());
    }

    #[test]
    fn save_replaces_record() {
        let store = MemoryStore::new();
        store.create(1, &PlayerProgress::new()).unwrap();
        let mut progress = PlayerProgress::new();
        progress.mark_completed(4);
        store.save(1, &progress).unwrap();
        assert_eq!(store.load(1).unwrap(), Some(progress));
    }

    #[test]
    fn all_is_ordered_by_user() {
        let store = MemoryStore::new();
        for id in [9, 2, 5] {
            store.create(id, &PlayerProgress::new()).unwrap();
        }
        let ids: Vec<UserId> = store.all().unwrap().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }
}
