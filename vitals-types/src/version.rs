//! Version stamp carried by every stored or exported log.

use core::fmt;

use crate::SCHEMA_VERSION;

/// `major.minor` stamp of the log layout.
///
/// Minor bumps only add optional fields, so any minor of the current major
/// can be read. Another major means the entry layout itself changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// The stamp written on logs saved by this build.
    pub const fn current() -> Self {
        Self::new(SCHEMA_VERSION, 0)
    }

    /// Check that a log stamped with this version can be loaded.
    pub fn ensure_readable(&self) -> Result<(), UnreadableLog> {
        if self.major == SCHEMA_VERSION {
            Ok(())
        } else {
            Err(UnreadableLog { found: *self })
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A log whose layout this build does not understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnreadableLog {
    pub found: SchemaVersion,
}

impl fmt::Display for UnreadableLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.found.major > SCHEMA_VERSION {
            write!(
                f,
                "log format {} is newer than this vitals-log (reads {}.x); upgrade to import it",
                self.found, SCHEMA_VERSION
            )
        } else {
            write!(
                f,
                "log format {} predates this vitals-log (reads {}.x)",
                self.found, SCHEMA_VERSION
            )
        }
    }
}

impl std::error::Error for UnreadableLog {}
