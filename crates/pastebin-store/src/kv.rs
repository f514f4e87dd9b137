//! The `KeyValueStore` seam between the paste core and its storage.

use std::sync::Arc;

use crate::error::StoreResult;

/// A string-keyed blob store.
///
/// Implementations make no promise about transactions spanning several
/// calls. `exists` followed by `set` is two independent operations and
/// another writer can slip in between them; only [`set_if_absent`] claims a
/// key atomically.
///
/// [`set_if_absent`]: KeyValueStore::set_if_absent
pub trait KeyValueStore: Send + Sync {
    /// Whether a value is currently stored under `key`.
    fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Fetch the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// Returns `true` when the write was accepted.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<bool>;

    /// Store `value` under `key` only if nothing is stored there yet.
    ///
    /// Returns `false`, leaving the existing value untouched, when the key
    /// is already taken.
    fn set_if_absent(&self, key: &str, value: &[u8]) -> StoreResult<bool>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        (**self).exists(key)
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        (**self).set(key, value)
    }

    fn set_if_absent(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        (**self).set_if_absent(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        (**self).exists(key)
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        (**self).set(key, value)
    }

    fn set_if_absent(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        (**self).set_if_absent(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        (**self).exists(key)
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        (**self).set(key, value)
    }

    fn set_if_absent(&self, key: &str, value: &[u8]) -> StoreResult<bool> {
        (**self).set_if_absent(key, value)
    }
}
