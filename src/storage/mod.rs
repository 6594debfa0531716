//! Storage abstraction for persisting the log.
//!
//! The log is stored as one opaque string blob under a fixed key. This
//! module provides a trait-based abstraction over where that blob lives
//! (files on disk, or an in-process map for tests and embedding).

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt::Debug;

use crate::error::Result;

/// Default key the log is stored under.
pub const DEFAULT_KEY: &str = "healthTrackerData";

/// Trait for whole-value key/value persistence.
///
/// Implementations must make `set` atomic: a reader sees either the old
/// value or the new one, never a partial write.
///
/// # Example
///
/// ```
/// use vitals_log::{MemoryStorage, Storage};
///
/// let mut storage = MemoryStorage::new();
/// storage.set("log", "{}").unwrap();
/// assert_eq!(storage.get("log").unwrap().as_deref(), Some("{}"));
/// ```
pub trait Storage: Send + Debug {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Returns a human-readable description of the storage.
    ///
    /// Used for display in the dashboard status bar.
    fn description(&self) -> &str;
}
