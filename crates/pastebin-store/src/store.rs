//! RedbStore — redb-backed `KeyValueStore` for pastebin.
//!
//! A single `pastes` table maps identifiers to opaque byte blobs. The store
//! supports both on-disk and in-memory backends (the latter for testing).

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;
use crate::tables::PASTES;

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// Thread-safe key-value store backed by redb.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "paste store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory paste store opened");
        Ok(store)
    }

    fn ensure_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(PASTES).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Number of stored values.
    pub fn len(&self) -> StoreResult<u64> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(PASTES).map_err(map_err!(Table))?;
        let mut count = 0;
        for entry in table.iter().map_err(map_err!(Read))? {
            entry.map_err(map_err!(Read))?;
            count += 1;
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for RedbStore {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(PASTES).map_err(map_err!(Table))?;
        let found = table.get(key).map_err(map_err!(Read))?.is_some();
        Ok(found)
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(PASTES).map_err(map_err!(Table))?;
        match table.get(key).map_err(map_err!(Read))? {
            Some(guard) => Ok(Some(guard.value().to_vec())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let replaced;
        {
            let mut table = txn.open_table(PASTES).map_err(map_err!(Table))?;
            replaced = table.insert(key, value).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, replaced, bytes = value.len(), "value stored");
        Ok(true)
    }

    fn set_if_absent(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        // redb admits one write transaction at a time, so the check and the
        // insert below cannot interleave with another writer.
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let taken;
        {
            let mut table = txn.open_table(PASTES).map_err(map_err!(Table))?;
            taken = table.get(key).map_err(map_err!(Read))?.is_some();
            if !taken {
                table.insert(key, value).map_err(map_err!(Write))?;
            }
        }
        if taken {
            txn.abort().map_err(map_err!(Transaction))?;
            debug!(%key, "claim rejected, key taken");
            return Ok(false);
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, bytes = value.len(), "key claimed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let store = RedbStore::open_in_memory().unwrap();

        assert!(store.set("abc", b"hello").unwrap());
        assert_eq!(store.get("abc").unwrap(), Some(b"hello".to_vec()));
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let store = RedbStore::open_in_memory().unwrap();
        assert!(store.get("nope").unwrap().is_none());
        assert!(!store.exists("nope").unwrap());
    }

    #[test]
    fn set_overwrites_in_place() {
        let store = RedbStore::open_in_memory().unwrap();
        store.set("abc", b"first").unwrap();
        store.set("abc", b"second").unwrap();

        assert_eq!(store.get("abc").unwrap(), Some(b"second".to_vec()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn exists_tracks_writes() {
        let store = RedbStore::open_in_memory().unwrap();
        assert!(!store.exists("abc").unwrap());
        store.set("abc", b"x").unwrap();
        assert!(store.exists("abc").unwrap());
    }

    #[test]
    fn set_if_absent_claims_once() {
        let store = RedbStore::open_in_memory().unwrap();

        assert!(store.set_if_absent("abc", b"first").unwrap());
        assert!(!store.set_if_absent("abc", b"second").unwrap());

        // The losing claim must not clobber the winner.
        assert_eq!(store.get("abc").unwrap(), Some(b"first".to_vec()));
    }

    #[test]
    fn concurrent_claims_have_one_winner() {
        let store = RedbStore::open_in_memory().unwrap();

        let winners: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let store = store.clone();
                    s.spawn(move || {
                        store
                            .set_if_absent("contested", format!("writer-{i}").as_bytes())
                            .unwrap()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap() as usize)
                .sum()
        });

        assert_eq!(winners, 1);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn empty_store() {
        let store = RedbStore::open_in_memory().unwrap();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn persistence_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.redb");

        {
            let store = RedbStore::open(&db_path).unwrap();
            store.set("kept", b"still here").unwrap();
        }

        // Reopen the same database file.
        let store = RedbStore::open(&db_path).unwrap();
        assert_eq!(store.get("kept").unwrap(), Some(b"still here".to_vec()));
    }

    #[test]
    fn open_rejects_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = RedbStore::open(dir.path()).err().unwrap();
        assert!(matches!(err, StoreError::Open(_)));
    }
}
