//! # vitals-log
//!
//! A personal health log for the terminal: blood pressure, pulse, sleep,
//! triggers, symptoms and medications, each reading flagged with a
//! severity zone.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          vitals-log                          │
//! │  ┌─────────┐    ┌────────────┐    ┌─────────┐   ┌─────────┐  │
//! │  │  form   │───▶│ repository │───▶│  view   │──▶│ stdout, │  │
//! │  │ (input) │    │   (log)    │    │(format) │   │ files,  │  │
//! │  └─────────┘    └─────┬──────┘    └─────────┘   │   TUI   │  │
//! │                       │                         └─────────┘  │
//! │                       ▼                                      │
//! │                 ┌──────────┐                                 │
//! │                 │ storage  │◀── FileStorage | MemoryStorage  │
//! │                 └──────────┘                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`form`]**: validates raw input and builds entry drafts
//! - **[`repository`]**: owns the [`Log`](vitals_types::Log), classifies new
//!   entries and persists the whole log after every change
//! - **[`storage`]**: key/value persistence ([`Storage`] trait) backed by
//!   files or memory
//! - **[`view`]**: table rows, chart series, Markdown and JSON
//! - **[`app`]**, **[`events`]**, **[`ui`]**: the interactive dashboard
//! - **[`insights`]**: keyword hints from free-text notes
//!
//! The data model (entries, zones, clock times) lives in the
//! [`vitals_types`] crate.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! vitals-log add --systolic 138 --diastolic 88 --pulse 72 --wellness 4
//! vitals-log list
//! vitals-log export --format md
//! vitals-log            # dashboard
//! ```
//!
//! ### As a library
//!
//! ```
//! use vitals_log::{form, EntryForm, MemoryStorage, Repository};
//! use vitals_types::Zone;
//!
//! let mut repo = Repository::open(Box::new(MemoryStorage::new()), "log").unwrap();
//!
//! let entry = form::submit(
//!     &mut repo,
//!     &EntryForm {
//!         systolic: Some("145".into()),
//!         diastolic: Some("85".into()),
//!         pulse: Some("70".into()),
//!         ..EntryForm::default()
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(entry.zone, Zone::Yellow);
//! assert_eq!(repo.len(), 1);
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod insights;
pub mod logging;
pub mod repository;
pub mod storage;
pub mod ui;
pub mod view;

// Re-export main types for convenience
pub use app::{App, DashboardOptions, View};
pub use config::Settings;
pub use error::{Error, Result};
pub use form::EntryForm;
pub use insights::Finding;
pub use repository::Repository;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use view::ExportFormat;
