//! The entry repository: owns the log and keeps storage in sync with it.
//!
//! Every mutation is followed by a full write of the log to the storage
//! collaborator. If that write fails the mutation is undone, so the
//! in-memory log never runs ahead of what was confirmed persisted.
//!
//! ## Ordering
//!
//! New entries are **prepended**: the stored order is newest-insert first,
//! and [`Repository::list`] returns that order. Views that need
//! chronological order (charts) sort by timestamp explicitly via
//! [`Repository::recent`].

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, Local, TimeDelta, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use vitals_types::{Entry, EntryDraft, Log, Profile, ZoneThresholds};

use crate::error::{Error, Result};
use crate::storage::Storage;

/// Owns the log for one process/session.
///
/// Construct once and hand `&mut Repository` to whatever needs it (CLI
/// commands, the dashboard).
///
/// # Example
///
/// ```
/// use vitals_log::{MemoryStorage, Repository};
/// use vitals_types::{EntryDraft, Zone};
///
/// let mut repo = Repository::open(Box::new(MemoryStorage::new()), "log").unwrap();
/// let entry = repo.append(EntryDraft::builder(152, 88, 70).build()).unwrap();
/// assert_eq!(entry.zone, Zone::Orange);
/// assert_eq!(repo.list(Some(1))[0].id, entry.id);
/// ```
#[derive(Debug)]
pub struct Repository {
    storage: Box<dyn Storage>,
    key: String,
    log: Log,
    thresholds: ZoneThresholds,
    utc_offset: Option<FixedOffset>,
}

impl Repository {
    /// Load the log stored under `key`.
    ///
    /// A missing value yields an empty log with the default profile; a
    /// value that is present but unreadable is a [`Error::Format`].
    pub fn open(storage: Box<dyn Storage>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let log = match storage.get(&key)? {
            Some(content) => decode(content.as_bytes())?,
            None => {
                debug!(key = %key, "no stored log, starting empty");
                Log::new()
            }
        };

        info!(storage = storage.description(), entries = log.len(), "opened log");

        Ok(Self {
            storage,
            key,
            log,
            thresholds: ZoneThresholds::default(),
            utc_offset: None,
        })
    }

    /// Use custom zone thresholds for entries appended from now on.
    pub fn with_thresholds(mut self, thresholds: ZoneThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Stamp new entries with a fixed UTC offset instead of local time.
    pub fn with_utc_offset(mut self, offset: Option<FixedOffset>) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Returns a description of the underlying storage.
    pub fn description(&self) -> &str {
        self.storage.description()
    }

    pub fn thresholds(&self) -> &ZoneThresholds {
        &self.thresholds
    }

    pub fn profile(&self) -> &Profile {
        &self.log.profile
    }

    /// The whole log, in stored order.
    pub fn log(&self) -> &Log {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Entry> {
        self.log.get(id)
    }

    /// Current time in the configured offset (local time by default).
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self.utc_offset {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => Local::now().fixed_offset(),
        }
    }

    /// Classify, store and persist a new entry.
    pub fn append(&mut self, draft: EntryDraft) -> Result<Entry> {
        let now = self.now();
        self.append_at(draft, now)
    }

    /// Like [`append`](Self::append) with an explicit capture time.
    pub fn append_at(&mut self, draft: EntryDraft, now: DateTime<FixedOffset>) -> Result<Entry> {
        let id = self.next_id(now);
        let entry = draft.into_entry(id, now, &self.thresholds);

        self.log.entries.insert(0, entry.clone());
        if let Err(e) = self.persist() {
            self.log.entries.remove(0);
            return Err(e);
        }

        info!(id = entry.id, zone = %entry.zone, bp = %entry.blood_pressure(), "appended entry");
        Ok(entry)
    }

    /// Ids are creation milliseconds, bumped past the current maximum when
    /// the clock would repeat or go backwards.
    fn next_id(&self, now: DateTime<FixedOffset>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match self.log.max_id() {
            Some(max) if max >= millis => max + 1,
            _ => millis,
        }
    }

    /// Entries in stored order (newest insert first), truncated to `limit`.
    pub fn list(&self, limit: Option<usize>) -> &[Entry] {
        let entries = &self.log.entries;
        match limit {
            Some(limit) => &entries[..limit.min(entries.len())],
            None => entries,
        }
    }

    /// Entries from the last `days` days, oldest first.
    pub fn recent(&self, days: u32) -> Vec<Entry> {
        self.recent_at(days, self.now())
    }

    /// Like [`recent`](Self::recent) relative to an explicit `now`.
    pub fn recent_at(&self, days: u32, now: DateTime<FixedOffset>) -> Vec<Entry> {
        let cutoff = now.checked_sub_signed(TimeDelta::days(i64::from(days)));

        let mut entries: Vec<Entry> = self
            .log
            .entries
            .iter()
            .filter(|e| cutoff.map_or(true, |c| e.timestamp >= c))
            .cloned()
            .collect();

        entries.sort_by_key(|e| e.timestamp);
        entries
    }

    /// Delete the entry with `id`.
    ///
    /// Returns `Ok(false)` without touching storage if there is no such entry.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let Some(pos) = self.log.entries.iter().position(|e| e.id == id) else {
            debug!(id, "remove: no such entry");
            return Ok(false);
        };

        let removed = self.log.entries.remove(pos);
        if let Err(e) = self.persist() {
            self.log.entries.insert(pos, removed);
            return Err(e);
        }

        info!(id, "removed entry");
        Ok(true)
    }

    /// The full log as pretty-printed JSON.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.log)?)
    }

    /// Replace the whole log with a serialized one.
    ///
    /// The current log is kept if the payload is rejected or the write fails.
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<()> {
        let incoming = decode(bytes)?;
        let count = incoming.len();

        let previous = std::mem::replace(&mut self.log, incoming);
        if let Err(e) = self.persist() {
            self.log = previous;
            return Err(e);
        }

        info!(entries = count, replaced = previous.len(), "replaced log");
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.log)?;
        self.storage.set(&self.key, &json).inspect_err(|e| {
            warn!(error = %e, "failed to persist log");
        })
    }
}

/// Parse a serialized log.
///
/// The payload must be a JSON object with an array-typed `entries` field;
/// `version` and `profile` fall back to defaults when absent. Every entry
/// must hold positive vitals, 1..=5 scales, a non-negative sleep duration
/// and an id no other entry uses.
pub fn decode(bytes: &[u8]) -> Result<Log> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| Error::Format(format!("not valid JSON: {}", e)))?;

    if !matches!(value.get("entries"), Some(Value::Array(_))) {
        return Err(Error::Format("payload has no `entries` array".to_string()));
    }

    let log: Log = serde_json::from_value(value)
        .map_err(|e| Error::Format(format!("malformed entry: {}", e)))?;

    log.version
        .ensure_readable()
        .map_err(|e| Error::Format(e.to_string()))?;

    check_entries(&log.entries)?;
    Ok(log)
}

fn check_entries(entries: &[Entry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        let bad = |what: String| Error::Format(format!("entry {}: {}", entry.id, what));

        if !seen.insert(entry.id) {
            return Err(bad("duplicate id".to_string()));
        }
        for (name, value) in [
            ("systolic", entry.systolic),
            ("diastolic", entry.diastolic),
            ("pulse", entry.pulse),
        ] {
            if value == 0 {
                return Err(bad(format!("{} must be positive", name)));
            }
        }

        check_scale("wellness", Some(entry.wellness)).map_err(bad)?;
        if let Some(sleep) = &entry.sleep {
            check_scale("sleep quality", sleep.quality).map_err(bad)?;
            if let Some(hours) = sleep.duration_hours {
                if hours < 0.0 {
                    return Err(bad(format!("sleep duration {} is negative", hours)));
                }
            }
        }
        for symptom in &entry.symptoms {
            check_scale("symptom intensity", symptom.intensity).map_err(bad)?;
        }
    }
    Ok(())
}

fn check_scale(name: &str, value: Option<u8>) -> std::result::Result<(), String> {
    match value {
        Some(v) if !(1..=5).contains(&v) => Err(format!("{} {} is outside 1..=5", name, v)),
        _ => Ok(()),
    }
}
