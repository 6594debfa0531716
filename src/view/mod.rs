//! Pure formatters from entries to displayable or exportable output.
//!
//! Nothing here touches storage or the terminal; every function takes
//! entries (or the whole log) and returns owned data.
//!
//! ## Submodules
//!
//! - [`table`]: fixed-column rows for tabular display
//! - [`chart`]: label-aligned numeric series for BP and pulse charts
//! - [`markdown`]: human-readable Markdown document
//! - [`json`]: the raw log, pretty-printed

pub mod chart;
pub mod json;
pub mod markdown;
pub mod table;

pub use chart::ChartSeries;
pub use table::TableRow;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use vitals_types::{Log, Sleep};

use crate::error::{Error, Result};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Json,
}

impl ExportFormat {
    /// File name used when no output path is given.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "daily-log.md",
            ExportFormat::Json => "health-data.json",
        }
    }

    /// Render the whole log in this format.
    ///
    /// Markdown lists entries in stored order; JSON is the raw log and can
    /// be imported back.
    pub fn render(&self, log: &Log) -> Result<String> {
        match self {
            ExportFormat::Markdown => Ok(markdown::render(&log.entries)),
            ExportFormat::Json => json::render(log),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::Validation(format!(
                "unknown export format {:?} (expected md or json)",
                other
            ))),
        }
    }
}

/// Date and time as shown in tables and section headings.
pub(crate) fn format_datetime(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Short sleep summary: `"7h 30m q4/5"`, `"q4/5"`, or `"-"`.
pub(crate) fn format_sleep(sleep: Option<&Sleep>) -> String {
    let Some(sleep) = sleep else {
        return "-".to_string();
    };

    let parts: Vec<String> = sleep
        .duration()
        .map(|d| d.to_string())
        .into_iter()
        .chain(sleep.quality.map(|q| format!("q{}/5", q)))
        .collect();

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, FixedOffset, TimeZone};
    use vitals_types::{
        Entry, EntryDraft, Medication, MedicationKind, Symptom, SymptomKind, TriggerKind,
        ZoneThresholds,
    };

    pub fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, day, hour, 30, 0)
            .unwrap()
    }

    /// A bare reading with no context.
    pub fn plain(id: u64, day: u32, sys: u16, dia: u16, pulse: u16) -> Entry {
        EntryDraft::builder(sys, dia, pulse).wellness(4).build().into_entry(
            id,
            at(day, 8),
            &ZoneThresholds::default(),
        )
    }

    /// A reading with every optional group filled in.
    pub fn detailed(id: u64, day: u32) -> Entry {
        EntryDraft::builder(152, 95, 88)
            .wellness(2)
            .sleep(|s| s.start("23:00".parse().unwrap()).end("05:30".parse().unwrap()).quality(2))
            .trigger(TriggerKind::SleepDeprivation, Some("5 h".to_string()))
            .trigger(TriggerKind::Weather, None)
            .symptom(Symptom::new(SymptomKind::OccipitalPain, Some(3)))
            .symptom(Symptom::other("dry mouth"))
            .medication(Medication::new(MedicationKind::Aminalon, Some(500.0)))
            .medication(Medication::other("chamomile tea"))
            .notes("headache in the evening")
            .build()
            .into_entry(id, at(day, 9), &ZoneThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sleep_variants() {
        assert_eq!(format_sleep(None), "-");
        assert_eq!(format_sleep(Some(&Sleep::default())), "-");
        assert_eq!(format_sleep(Some(&Sleep::new(None, None, Some(4)))), "q4/5");

        let full = Sleep::new(Some("23:15".parse().unwrap()), Some("06:45".parse().unwrap()), Some(5));
        assert_eq!(format_sleep(Some(&full)), "7h 30m q5/5");
    }

    #[test]
    fn test_export_format() {
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("csv".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Json.default_file_name(), "health-data.json");

        let mut log = Log::new();
        log.entries.push(fixtures::plain(1, 3, 120, 80, 70));
        assert!(ExportFormat::Markdown.render(&log).unwrap().starts_with("# Health log"));
        assert!(ExportFormat::Json.render(&log).unwrap().contains("\"entries\""));
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(&fixtures::at(3, 7)), "2024-05-03 07:30");
    }
}
