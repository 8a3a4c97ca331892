//! # Storage Contract
//!
//! The durable key/value slot the cart mirrors itself into.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get(key)         → Ok(None) when the key was never written            │
//! │  set(key, value)  → replaces the whole value                           │
//! │  remove(key)      → the key is ABSENT afterwards (not empty)           │
//! │                                                                         │
//! │  All calls are synchronous and complete before the next cart call.     │
//! │  Values are opaque strings; the cart stores JSON.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`MemoryStore`] lives here for tests and embedding; the file-backed store
//! lives in `storefront-storage` so this crate stays free of I/O.

use std::collections::HashMap;

use crate::error::{StorageError, StorageResult};

/// A synchronous string key/value store.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// Lending a store to a cart: the caller keeps ownership and can reload
/// from the same store once the cart is dropped.
impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Process-local store backed by a `HashMap`.
///
/// An optional quota (total bytes of keys + values) mimics the size limit
/// browsers put on local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that refuses writes beyond `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        MemoryStore {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seeds a raw value, bypassing the quota (useful for corrupt-data tests).
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Returns true if `key` currently holds a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the raw value under `key` without going through the trait.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota {
            if self.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
