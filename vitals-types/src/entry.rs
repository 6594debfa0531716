//! Entry records and the draft builder used to create them.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, FixedOffset};

use crate::{sleep_duration, ClockTime, SleepDuration, Zone, ZoneThresholds};

/// Error returned when parsing an unknown trigger, symptom or medication kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError {
    what: &'static str,
    value: String,
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} kind: {}", self.what, self.value)
    }
}

impl std::error::Error for ParseKindError {}

/// Declares a closed kind enumeration with its wire name and default label.
macro_rules! kind_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => $wire:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every kind, in form order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Snake-case identifier, as stored in serialized logs.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Default human-readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseKindError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|k| k.as_str() == wanted)
                    .ok_or_else(|| ParseKindError { what: $what, value: s.to_string() })
            }
        }
    };
}

kind_enum! {
    /// Something that may have provoked a bad reading.
    TriggerKind, "trigger" {
        SleepDeprivation => "sleep_deprivation", "Sleep deprivation";
        HeadTilt => "head_tilt", "Head tilt work";
        NeckSpasm => "neck_spasm", "Neck spasm";
        Stress => "stress", "Stress / anxiety";
        Weather => "weather", "Weather change";
        Temperature => "temperature", "Temperature discomfort";
    }
}

kind_enum! {
    /// A symptom noticed around the time of the reading.
    SymptomKind, "symptom" {
        RhythmDisruption => "rhythm_disruption", "Rhythm disruption";
        Tinnitus => "tinnitus", "Tinnitus";
        OccipitalPain => "occipital_pain", "Occipital pain";
        Instability => "instability", "Instability";
        Other => "other", "Other";
    }
}

kind_enum! {
    /// A medication taken around the time of the reading.
    MedicationKind, "medication" {
        Aminalon => "aminalon", "Aminalon";
        MagnesiumB6 => "magnesium_b6", "Magnesium + B6";
        Other => "other", "Other";
    }
}

/// A possible trigger with optional free-form detail (e.g. `"5 h"`, `"3/5"`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trigger {
    pub kind: TriggerKind,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail: Option<String>,
}

impl Trigger {
    pub fn new(kind: TriggerKind, detail: Option<String>) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            detail,
        }
    }
}

/// A symptom with optional 1..=5 intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symptom {
    pub kind: SymptomKind,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub intensity: Option<u8>,
    /// Free text, used by [`SymptomKind::Other`].
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub detail: Option<String>,
}

impl Symptom {
    pub fn new(kind: SymptomKind, intensity: Option<u8>) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            intensity,
            detail: None,
        }
    }

    /// A free-text symptom outside the fixed list.
    pub fn other(text: impl Into<String>) -> Self {
        Self {
            detail: Some(text.into()),
            ..Self::new(SymptomKind::Other, None)
        }
    }
}

/// A medication with optional dose in milligrams.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Medication {
    pub kind: MedicationKind,
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dose: Option<f64>,
    /// Free text, used by [`MedicationKind::Other`].
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub detail: Option<String>,
}

impl Medication {
    pub fn new(kind: MedicationKind, dose: Option<f64>) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            dose,
            detail: None,
        }
    }

    /// A free-text medication outside the fixed list.
    pub fn other(text: impl Into<String>) -> Self {
        Self {
            detail: Some(text.into()),
            ..Self::new(MedicationKind::Other, None)
        }
    }
}

/// The night before the reading.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Sleep {
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<ClockTime>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<ClockTime>,
    /// Subjective quality, 1..=5.
    #[cfg_attr(feature = "serde", serde(default))]
    pub quality: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_hours: Option<f64>,
}

impl Sleep {
    /// Build a sleep record, filling `duration_hours` when both times are known.
    pub fn new(start: Option<ClockTime>, end: Option<ClockTime>, quality: Option<u8>) -> Self {
        Self {
            start,
            end,
            quality,
            duration_hours: sleep_duration(start, end).map(|d| d.total_hours),
        }
    }

    /// Elapsed sleep, recomputed from the clock readings.
    pub fn duration(&self) -> Option<SleepDuration> {
        sleep_duration(self.start, self.end)
    }

    /// True if nothing at all was recorded.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.quality.is_none()
    }
}

/// One logged observation.
///
/// `zone` is computed once when the entry is created and never
/// recomputed, so changing thresholds later does not rewrite history.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub id: u64,
    pub timestamp: DateTime<FixedOffset>,
    pub systolic: u16,
    pub diastolic: u16,
    pub pulse: u16,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub sleep: Option<Sleep>,
    pub wellness: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers: Vec<Trigger>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub symptoms: Vec<Symptom>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub medications: Vec<Medication>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub notes: Option<String>,
    pub zone: Zone,
}

impl Entry {
    /// Systolic/diastolic pair formatted as `"138/88"`.
    pub fn blood_pressure(&self) -> String {
        format!("{}/{}", self.systolic, self.diastolic)
    }
}

/// Everything the user supplies for a new entry.
///
/// The repository assigns the id and zone; the timestamp defaults to the
/// capture time when not given.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub systolic: u16,
    pub diastolic: u16,
    pub pulse: u16,
    pub sleep: Option<Sleep>,
    pub wellness: u8,
    pub triggers: Vec<Trigger>,
    pub symptoms: Vec<Symptom>,
    pub medications: Vec<Medication>,
    pub notes: Option<String>,
}

impl EntryDraft {
    /// Create a builder seeded with the required vitals.
    pub fn builder(systolic: u16, diastolic: u16, pulse: u16) -> EntryDraftBuilder {
        EntryDraftBuilder::new(systolic, diastolic, pulse)
    }

    /// Classify the draft against `thresholds`.
    pub fn zone(&self, thresholds: &ZoneThresholds) -> Zone {
        thresholds.classify(self.systolic, self.diastolic, self.pulse)
    }

    /// Turn the draft into a stored entry.
    ///
    /// `captured_at` is used only when the draft carries no timestamp.
    pub fn into_entry(
        self,
        id: u64,
        captured_at: DateTime<FixedOffset>,
        thresholds: &ZoneThresholds,
    ) -> Entry {
        let zone = self.zone(thresholds);
        Entry {
            id,
            timestamp: self.timestamp.unwrap_or(captured_at),
            systolic: self.systolic,
            diastolic: self.diastolic,
            pulse: self.pulse,
            sleep: self.sleep,
            wellness: self.wellness,
            triggers: self.triggers,
            symptoms: self.symptoms,
            medications: self.medications,
            notes: self.notes,
            zone,
        }
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Builder for [`EntryDraft`].
#[derive(Debug)]
pub struct EntryDraftBuilder {
    draft: EntryDraft,
}

impl EntryDraftBuilder {
    /// Create a new builder. Wellness defaults to 3.
    pub fn new(systolic: u16, diastolic: u16, pulse: u16) -> Self {
        Self {
            draft: EntryDraft {
                timestamp: None,
                systolic,
                diastolic,
                pulse,
                sleep: None,
                wellness: 3,
                triggers: Vec::new(),
                symptoms: Vec::new(),
                medications: Vec::new(),
                notes: None,
            },
        }
    }

    /// Pin the moment the entry represents.
    pub fn timestamp(mut self, ts: DateTime<FixedOffset>) -> Self {
        self.draft.timestamp = Some(ts);
        self
    }

    pub fn wellness(mut self, wellness: u8) -> Self {
        self.draft.wellness = wellness;
        self
    }

    /// Add sleep details built using a closure.
    pub fn sleep<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SleepBuilder) -> SleepBuilder,
    {
        self.draft.sleep = Some(f(SleepBuilder::default()).build());
        self
    }

    pub fn trigger(mut self, kind: TriggerKind, detail: Option<String>) -> Self {
        self.draft.triggers.push(Trigger::new(kind, detail));
        self
    }

    pub fn symptom(mut self, symptom: Symptom) -> Self {
        self.draft.symptoms.push(symptom);
        self
    }

    pub fn medication(mut self, medication: Medication) -> Self {
        self.draft.medications.push(medication);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.draft.notes = Some(notes.into());
        self
    }

    pub fn build(self) -> EntryDraft {
        self.draft
    }
}

/// Builder for [`Sleep`].
#[derive(Debug, Default)]
pub struct SleepBuilder {
    start: Option<ClockTime>,
    end: Option<ClockTime>,
    quality: Option<u8>,
}

impl SleepBuilder {
    pub fn start(mut self, start: ClockTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: ClockTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn build(self) -> Sleep {
        Sleep::new(self.start, self.end, self.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 10, h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_builder_collects_context() {
        let draft = EntryDraft::builder(150, 95, 80)
            .wellness(2)
            .trigger(TriggerKind::Stress, Some("4/5".into()))
            .symptom(Symptom::new(SymptomKind::Tinnitus, None))
            .symptom(Symptom::other("dry mouth"))
            .medication(Medication::new(MedicationKind::Aminalon, Some(500.0)))
            .notes("after work")
            .build();

        assert_eq!(draft.wellness, 2);
        assert_eq!(draft.triggers[0].label, "Stress / anxiety");
        assert_eq!(draft.symptoms[1].detail.as_deref(), Some("dry mouth"));
        assert_eq!(draft.medications[0].dose, Some(500.0));
        assert_eq!(draft.notes.as_deref(), Some("after work"));
    }

    #[test]
    fn test_into_entry_classifies_once() {
        let draft = EntryDraft::builder(150, 95, 80).build();
        let entry = draft.into_entry(7, at(9), &ZoneThresholds::default());
        assert_eq!(entry.id, 7);
        assert_eq!(entry.zone, Zone::Yellow);
        assert_eq!(entry.timestamp, at(9));
        assert_eq!(entry.blood_pressure(), "150/95");
    }

    #[test]
    fn test_draft_timestamp_wins_over_capture_time() {
        let draft = EntryDraft::builder(120, 80, 70).timestamp(at(7)).build();
        let entry = draft.into_entry(1, at(9), &ZoneThresholds::default());
        assert_eq!(entry.timestamp, at(7));
    }

    #[test]
    fn test_sleep_builder_fills_duration() {
        let draft = EntryDraft::builder(120, 80, 70)
            .sleep(|s| {
                s.start("23:30".parse().unwrap()).end("06:00".parse().unwrap()).quality(4)
            })
            .build();
        let sleep = draft.sleep.unwrap();
        assert_eq!(sleep.duration_hours, Some(6.5));
        assert_eq!(sleep.duration().unwrap().minutes, 30);
        assert!(!sleep.is_empty());
    }

    #[test]
    fn test_sleep_without_times_has_no_duration() {
        let sleep = Sleep::new(None, None, Some(3));
        assert!(sleep.duration_hours.is_none());
        assert!(Sleep::default().is_empty());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("neck-spasm".parse::<TriggerKind>(), Ok(TriggerKind::NeckSpasm));
        assert_eq!("OCCIPITAL_PAIN".parse::<SymptomKind>(), Ok(SymptomKind::OccipitalPain));
        assert_eq!("magnesium_b6".parse::<MedicationKind>(), Ok(MedicationKind::MagnesiumB6));
        let err = "coffee".parse::<MedicationKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown medication kind: coffee");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let entry = EntryDraft::builder(172, 100, 90)
            .sleep(|s| s.start("22:00".parse().unwrap()).end("05:30".parse().unwrap()))
            .trigger(TriggerKind::SleepDeprivation, Some("5 h".into()))
            .symptom(Symptom::new(SymptomKind::OccipitalPain, Some(3)))
            .medication(Medication::other("herbal tea"))
            .build()
            .into_entry(1710050400000, at(8), &ZoneThresholds::default());

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"sleep_deprivation\""));
        assert!(json.contains("\"durationHours\":7.5"));
        assert!(json.contains("\"zone\":\"red\""));

        let parsed: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_tolerates_missing_optionals() {
        let json = r#"{
            "id": 1,
            "timestamp": "2024-03-10T09:00:00+03:00",
            "systolic": 130, "diastolic": 85, "pulse": 70,
            "wellness": 4,
            "zone": "green"
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert!(entry.sleep.is_none());
        assert!(entry.triggers.is_empty());
        assert!(entry.notes.is_none());
    }
}
