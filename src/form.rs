//! Form controller: raw user input in, validated entry out.
//!
//! [`EntryForm`] mirrors the fields of the entry form as the user typed
//! them (vitals arrive as text, scales as small integers, checkboxes as
//! lists of kinds). [`EntryForm::build_draft`] validates everything and
//! assembles the trigger/symptom/medication details; [`submit`] hands
//! the draft to the repository.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use tracing::{debug, info};
use vitals_types::{
    ClockTime, Entry, EntryDraft, Medication, MedicationKind, Sleep, Symptom, SymptomKind,
    TriggerKind,
};

use crate::error::{Error, Result};
use crate::repository::Repository;

/// Value used for 1..=5 sliders the user did not move.
const SCALE_DEFAULT: u8 = 3;

/// Accepted layouts for a local date and time without offset.
const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Raw contents of the entry form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    /// Moment of the reading; capture time when empty.
    pub datetime: Option<String>,
    pub systolic: Option<String>,
    pub diastolic: Option<String>,
    pub pulse: Option<String>,

    pub sleep_start: Option<String>,
    pub sleep_end: Option<String>,
    pub sleep_quality: Option<u8>,

    pub wellness: Option<u8>,

    pub triggers: Vec<TriggerKind>,
    /// Hours slept, shown as the sleep deprivation detail.
    pub sleep_hours: Option<f64>,
    /// Minutes spent with the head tilted.
    pub head_tilt_minutes: Option<u32>,
    pub neck_spasm: Option<u8>,
    pub stress_level: Option<u8>,

    pub symptoms: Vec<SymptomKind>,
    pub occipital_pain: Option<u8>,
    pub other_symptoms: Option<String>,

    pub medications: Vec<MedicationKind>,
    pub aminalon_dose: Option<f64>,
    pub other_medications: Option<String>,

    pub notes: Option<String>,
}

impl EntryForm {
    /// Validate the form and assemble a draft.
    ///
    /// `offset` is applied to a `datetime` given without one.
    pub fn build_draft(&self, offset: FixedOffset) -> Result<EntryDraft> {
        let systolic = parse_vital("systolic", self.systolic.as_deref())?;
        let diastolic = parse_vital("diastolic", self.diastolic.as_deref())?;
        let pulse = parse_vital("pulse", self.pulse.as_deref())?;

        let wellness = scale("wellness", self.wellness)?.unwrap_or(SCALE_DEFAULT);
        let mut builder = EntryDraft::builder(systolic, diastolic, pulse).wellness(wellness);

        if let Some(ts) = non_empty(self.datetime.as_deref()) {
            builder = builder.timestamp(parse_datetime(ts, offset)?);
        }

        if let Some(sleep) = self.sleep()? {
            builder = builder.sleep(|s| {
                let s = match sleep.start {
                    Some(t) => s.start(t),
                    None => s,
                };
                let s = match sleep.end {
                    Some(t) => s.end(t),
                    None => s,
                };
                match sleep.quality {
                    Some(q) => s.quality(q),
                    None => s,
                }
            });
        }

        for &kind in &self.triggers {
            builder = builder.trigger(kind, self.trigger_detail(kind)?);
        }

        for symptom in self.symptoms()? {
            builder = builder.symptom(symptom);
        }

        for medication in self.medications()? {
            builder = builder.medication(medication);
        }

        if let Some(notes) = non_empty(self.notes.as_deref()) {
            builder = builder.notes(notes);
        }

        Ok(builder.build())
    }

    /// Sleep section, or `None` when nothing was filled in.
    fn sleep(&self) -> Result<Option<Sleep>> {
        let start = parse_clock("sleep start", self.sleep_start.as_deref())?;
        let end = parse_clock("sleep end", self.sleep_end.as_deref())?;
        let quality = scale("sleep quality", self.sleep_quality)?;

        let sleep = Sleep::new(start, end, quality);
        Ok((!sleep.is_empty()).then_some(sleep))
    }

    fn trigger_detail(&self, kind: TriggerKind) -> Result<Option<String>> {
        let detail = match kind {
            TriggerKind::SleepDeprivation => match self.sleep_hours {
                Some(h) if !(0.0..=24.0).contains(&h) => {
                    return Err(Error::Validation(format!(
                        "hours slept must be between 0 and 24, got {}",
                        h
                    )))
                }
                Some(h) => Some(format!("{} h", h)),
                None => None,
            },
            TriggerKind::HeadTilt => self.head_tilt_minutes.map(|m| format!("{} min", m)),
            TriggerKind::NeckSpasm => {
                let level = scale("neck spasm", self.neck_spasm)?.unwrap_or(SCALE_DEFAULT);
                Some(format!("{}/5", level))
            }
            TriggerKind::Stress => {
                let level = scale("stress level", self.stress_level)?.unwrap_or(SCALE_DEFAULT);
                Some(format!("{}/5", level))
            }
            TriggerKind::Weather | TriggerKind::Temperature => None,
        };
        Ok(detail)
    }

    fn symptoms(&self) -> Result<Vec<Symptom>> {
        let other = non_empty(self.other_symptoms.as_deref());
        let mut out = Vec::new();

        for &kind in &self.symptoms {
            match kind {
                SymptomKind::OccipitalPain => {
                    let intensity =
                        scale("occipital pain", self.occipital_pain)?.unwrap_or(SCALE_DEFAULT);
                    out.push(Symptom::new(kind, Some(intensity)));
                }
                SymptomKind::Other if other.is_none() => {
                    return Err(Error::Validation(
                        "describe the other symptom in its text field".to_string(),
                    ));
                }
                // added once from the text field below
                SymptomKind::Other => {}
                _ => out.push(Symptom::new(kind, None)),
            }
        }

        if let Some(text) = other {
            out.push(Symptom::other(text));
        }
        Ok(out)
    }

    fn medications(&self) -> Result<Vec<Medication>> {
        let other = non_empty(self.other_medications.as_deref());
        let mut out = Vec::new();

        for &kind in &self.medications {
            match kind {
                MedicationKind::Aminalon => {
                    let dose = match self.aminalon_dose {
                        Some(d) if !(d.is_finite() && d > 0.0) => {
                            return Err(Error::Validation(format!(
                                "aminalon dose must be a positive number, got {}",
                                d
                            )))
                        }
                        dose => dose,
                    };
                    out.push(Medication::new(kind, dose));
                }
                MedicationKind::Other if other.is_none() => {
                    return Err(Error::Validation(
                        "describe the other medication in its text field".to_string(),
                    ));
                }
                MedicationKind::Other => {}
                MedicationKind::MagnesiumB6 => out.push(Medication::new(kind, None)),
            }
        }

        if let Some(text) = other {
            out.push(Medication::other(text));
        }
        Ok(out)
    }
}

/// Validate `form` and append the resulting entry to `repo`.
///
/// Nothing is stored when validation fails.
pub fn submit(repo: &mut Repository, form: &EntryForm) -> Result<Entry> {
    let offset = *repo.now().offset();
    let draft = form.build_draft(offset).inspect_err(|e| {
        debug!(error = %e, "rejected entry form");
    })?;

    let entry = repo.append(draft)?;
    info!(id = entry.id, zone = %entry.zone, "entry saved");
    Ok(entry)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_vital(name: &str, value: Option<&str>) -> Result<u16> {
    let raw = non_empty(value).ok_or_else(|| Error::Validation(format!("{} is required", name)))?;
    let parsed: u16 = raw
        .parse()
        .map_err(|_| Error::Validation(format!("{} must be a whole number, got {:?}", name, raw)))?;
    if parsed == 0 {
        return Err(Error::Validation(format!("{} must be positive", name)));
    }
    Ok(parsed)
}

fn scale(name: &str, value: Option<u8>) -> Result<Option<u8>> {
    match value {
        Some(v) if !(1..=5).contains(&v) => Err(Error::Validation(format!(
            "{} must be between 1 and 5, got {}",
            name, v
        ))),
        v => Ok(v),
    }
}

fn parse_clock(name: &str, value: Option<&str>) -> Result<Option<ClockTime>> {
    non_empty(value)
        .map(|raw| {
            raw.parse::<ClockTime>()
                .map_err(|e| Error::Validation(format!("{}: {}", name, e)))
        })
        .transpose()
}

/// Parse an RFC 3339 timestamp, or a local `YYYY-MM-DD[T ]HH:MM` in `offset`.
pub fn parse_datetime(raw: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts);
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .ok_or_else(|| {
            Error::Validation(format!(
                "date/time must look like 2024-05-01T08:30 or RFC 3339, got {:?}",
                raw
            ))
        })
}
