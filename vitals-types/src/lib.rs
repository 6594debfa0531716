//! # vitals-types
//!
//! Core types for a personal health log. This crate defines the record
//! schema shared by the log store, its exporters and any other consumer of
//! exported files.
//!
//! ## Design Goals
//!
//! - **Pure core**: zone classification and sleep math have no I/O and no error cases
//! - **Optional serialization**: enable the `serde` feature for JSON and friends
//! - **Versioned schema**: logs carry version info for forward compatibility
//! - **Ergonomic builders**: fluent API for constructing entry drafts
//!
//! ## Features
//!
//! - `serde`: serialization via serde (also enables `chrono/serde`)
//!
//! ## Example
//!
//! ```rust
//! use vitals_types::{classify, sleep_duration, ClockTime, EntryDraft, TriggerKind, Zone};
//!
//! assert_eq!(classify(151, 78, 65), Zone::Orange);
//!
//! let start: ClockTime = "23:00".parse().unwrap();
//! let end: ClockTime = "06:00".parse().unwrap();
//! let slept = sleep_duration(Some(start), Some(end)).unwrap();
//! assert_eq!(slept.hours, 7);
//!
//! let draft = EntryDraft::builder(138, 88, 72)
//!     .wellness(4)
//!     .sleep(|s| s.start(start).end(end).quality(3))
//!     .trigger(TriggerKind::Weather, None)
//!     .build();
//! assert_eq!(draft.triggers.len(), 1);
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**. The version is included in serialized
//! logs to allow consumers to handle format evolution gracefully.

mod clock;
mod entry;
mod log;
mod version;
mod zone;

pub use clock::*;
pub use entry::*;
pub use log::*;
pub use version::*;
pub use zone::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the log format.
pub const SCHEMA_VERSION: u32 = 1;
