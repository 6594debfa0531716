//! In-memory storage.
//!
//! Keeps values in a shared map. Useful for tests and for embedding the
//! log in another program that handles persistence itself.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Storage;
use crate::error::{Error, Result};

#[derive(Debug)]
struct Inner {
    values: HashMap<String, String>,
    available: bool,
    writes: usize,
}

/// A storage backend that holds values in process memory.
///
/// Clones share the same underlying map, so a caller can keep a handle
/// after boxing the storage into a [`Repository`](crate::Repository). The
/// backend can be taken offline with [`MemoryStorage::set_available`] to
/// exercise the failure path of callers.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create an empty, available storage.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                values: HashMap::new(),
                available: true,
                writes: 0,
            })),
        }
    }

    /// Create a storage pre-populated with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.inner.lock().values.insert(key.to_string(), value.to_string());
        storage
    }

    /// Toggle whether reads and writes succeed.
    pub fn set_available(&self, available: bool) {
        self.inner.lock().available = available;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }

    /// Peek at a stored value regardless of availability.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.lock().values.get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.lock();
        if !inner.available {
            return Err(Error::StorageUnavailable("memory storage is offline".to_string()));
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        if !inner.available {
            return Err(Error::StorageUnavailable("memory storage is offline".to_string()));
        }
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn description(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("k").unwrap().is_none());

        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn test_memory_storage_offline() {
        let mut storage = MemoryStorage::with_value("k", "v");
        storage.set_available(false);

        assert!(matches!(storage.get("k"), Err(Error::StorageUnavailable(_))));
        assert!(matches!(storage.set("k", "w"), Err(Error::StorageUnavailable(_))));
        assert_eq!(storage.writes(), 0);
        assert_eq!(storage.raw("k").as_deref(), Some("v"));

        storage.set_available(true);
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_storage_clones_share_state() {
        let mut storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.set("k", "v").unwrap();
        assert_eq!(handle.raw("k").as_deref(), Some("v"));

        handle.set_available(false);
        assert!(storage.get("k").is_err());
    }
}
