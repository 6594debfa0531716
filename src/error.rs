//! Error types for the log store and its collaborators.

use thiserror::Error;

/// Errors that can end a user action.
///
/// Each error aborts only the action that raised it; the log is left as it
/// was before the action started.
#[derive(Debug, Error)]
pub enum Error {
    /// Submitted values are missing or out of range. Nothing was stored.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A payload could not be understood as a log.
    #[error("Unrecognized log format: {0}")]
    Format(String),

    /// The storage medium could not be read or written.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Reading or writing an export/import file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Format(err.to_string())
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
