//! In-process `KeyValueStore` over a mutex-guarded map.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

/// A `HashMap` behind a `Mutex`. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl KeyValueStore for MemoryStore {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.lock()?.contains_key(key))
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(true)
    }

    fn set_if_absent(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        let mut entries = self.lock()?;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), value.to_vec());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud() {
        let store = MemoryStore::new();
        assert!(store.is_empty().unwrap());

        store.set("a", b"1").unwrap();
        assert!(store.exists("a").unwrap());
        assert_eq!(store.get("a").unwrap(), Some(b"1".to_vec()));

        store.set("a", b"2").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn set_if_absent_keeps_first_value() {
        let store = MemoryStore::new();
        assert!(store.set_if_absent("a", b"1").unwrap());
        assert!(!store.set_if_absent("a", b"2").unwrap());
        assert_eq!(store.get("a").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn poisoned_lock_is_an_error() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(store.get("a"), Err(StoreError::Poisoned)));
    }
}
