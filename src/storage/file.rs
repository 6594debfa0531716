//! File-based storage.
//!
//! Each key maps to `<dir>/<key>.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Storage;
use crate::error::{Error, Result};

/// A storage backend that keeps each value in its own file.
///
/// Writes go to a sibling temp file which is then renamed over the
/// target, so an interrupted write never leaves a truncated log behind.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    description: String,
}

impl FileStorage {
    /// Create a file storage rooted at `dir`.
    ///
    /// The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let description = format!("file: {}", dir.display());
        Self { dir, description }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(Error::StorageUnavailable(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "read log");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::StorageUnavailable(format!(
                "Read error: {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let unavailable = |e: std::io::Error| {
            Error::StorageUnavailable(format!("Write error: {}: {}", path.display(), e))
        };

        fs::create_dir_all(&self.dir).map_err(unavailable)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(unavailable)?;
        fs::rename(&tmp, &path).map_err(unavailable)?;

        debug!(path = %path.display(), bytes = value.len(), "wrote log");
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }
}
