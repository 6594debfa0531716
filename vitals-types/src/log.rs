//! Log - the full collection of entries plus reference ranges.

use crate::{Entry, SchemaVersion};

/// Reference ranges for "normal" vitals.
///
/// Informational only: shown next to readings and drawn on charts, but
/// never used to classify entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Profile {
    /// Inclusive `[low, high]` in mmHg.
    pub normal_systolic: [u16; 2],
    /// Inclusive `[low, high]` in mmHg.
    pub normal_diastolic: [u16; 2],
    /// Inclusive `[low, high]` in bpm.
    pub normal_pulse: [u16; 2],
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            normal_systolic: [128, 140],
            normal_diastolic: [78, 90],
            normal_pulse: [65, 85],
        }
    }
}

/// The whole persisted log.
///
/// Entry order is whatever the owner stored; display code must sort by
/// timestamp itself rather than assume chronological order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Log {
    /// Schema version for forward compatibility.
    #[cfg_attr(feature = "serde", serde(default))]
    pub version: SchemaVersion,

    pub entries: Vec<Entry>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: Profile,
}

impl Log {
    /// An empty log with the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by id.
    pub fn get(&self, id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Highest id currently in use.
    pub fn max_id(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntryDraft, ZoneThresholds};
    use chrono::{FixedOffset, TimeZone};

    fn sample_log() -> Log {
        let tz = FixedOffset::east_opt(0).unwrap();
        let mut log = Log::new();
        for (i, sys) in [120u16, 145, 175].into_iter().enumerate() {
            let ts = tz.with_ymd_and_hms(2024, 1, 1 + i as u32, 8, 0, 0).unwrap();
            let entry = EntryDraft::builder(sys, 80, 70).build().into_entry(
                100 + i as u64,
                ts,
                &ZoneThresholds::default(),
            );
            log.entries.push(entry);
        }
        log
    }

    #[test]
    fn test_lookup() {
        let log = sample_log();
        assert_eq!(log.len(), 3);
        assert_eq!(log.get(101).map(|e| e.systolic), Some(145));
        assert!(log.get(999).is_none());
        assert_eq!(log.max_id(), Some(102));
        assert_eq!(Log::new().max_id(), None);
    }

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.normal_systolic, [128, 140]);
        assert_eq!(profile.normal_pulse, [65, 85]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let log = sample_log();
        let json = serde_json::to_string_pretty(&log).unwrap();
        assert!(json.contains("\"normalSystolic\""));
        let parsed: Log = serde_json::from_str(&json).unwrap();
        assert_eq!(log, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_defaults_version_and_profile() {
        let parsed: Log = serde_json::from_str(r#"{"entries": []}"#).unwrap();
        assert!(parsed.is_empty());
        assert!(parsed.version.ensure_readable().is_ok());
        assert_eq!(parsed.profile, Profile::default());
    }
}
