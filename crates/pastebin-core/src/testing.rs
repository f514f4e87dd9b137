//! Store and identifier fakes shared by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use pastebin_store::{KeyValueStore, StoreError, StoreResult};

use crate::id::IdentifierSource;
use crate::paste::PasteId;

/// Reports every key as taken and refuses every claim.
pub struct SaturatedStore;

impl KeyValueStore for SaturatedStore {
    fn exists(&self, _key: &str) -> StoreResult<bool> {
        Ok(true)
    }

    fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &[u8]) -> StoreResult<bool> {
        Ok(true)
    }

    fn set_if_absent(&self, _key: &str, _value: &[u8]) -> StoreResult<bool> {
        Ok(false)
    }
}

/// Fails every call as if the backing database were gone.
pub struct DownStore;

impl KeyValueStore for DownStore {
    fn exists(&self, _key: &str) -> StoreResult<bool> {
        Err(StoreError::Open("connection refused".into()))
    }

    fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        Err(StoreError::Open("connection refused".into()))
    }

    fn set(&self, _key: &str, _value: &[u8]) -> StoreResult<bool> {
        Err(StoreError::Open("connection refused".into()))
    }

    fn set_if_absent(&self, _key: &str, _value: &[u8]) -> StoreResult<bool> {
        Err(StoreError::Open("connection refused".into()))
    }
}

/// Answers reads normally but reports every write as not accepted.
#[derive(Default)]
pub struct RejectingStore;

impl KeyValueStore for RejectingStore {
    fn exists(&self, _key: &str) -> StoreResult<bool> {
        Ok(false)
    }

    fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &[u8]) -> StoreResult<bool> {
        Ok(false)
    }

    fn set_if_absent(&self, _key: &str, _value: &[u8]) -> StoreResult<bool> {
        Ok(false)
    }
}

/// Hands out a fixed script of ids, then repeats the last one.
pub struct ScriptedIds {
    queue: Mutex<VecDeque<PasteId>>,
    last: PasteId,
}

impl ScriptedIds {
    pub fn new(ids: &[&str]) -> Self {
        let queue: VecDeque<PasteId> = ids.iter().map(|s| PasteId::parse(s).unwrap()).collect();
        let last = queue.back().cloned().unwrap();
        Self {
            queue: Mutex::new(queue),
            last,
        }
    }
}

impl IdentifierSource for ScriptedIds {
    fn candidate(&self) -> PasteId {
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.clone())
    }
}
