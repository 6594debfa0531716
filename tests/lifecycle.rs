//! End-to-end: record, list, export, re-import and delete through the
//! public API with file-backed storage.

use std::fs;

use chrono::{FixedOffset, TimeZone};
use tempfile::TempDir;
use vitals_log::repository::decode;
use vitals_log::{form, EntryForm, Error, ExportFormat, FileStorage, Repository};
use vitals_types::{EntryDraft, SymptomKind, TriggerKind, Zone};

fn open(dir: &TempDir) -> Repository {
    Repository::open(Box::new(FileStorage::new(dir.path())), "healthTrackerData").unwrap()
}

fn reading(sys: &str, dia: &str, pulse: &str, at: &str) -> EntryForm {
    EntryForm {
        datetime: Some(at.to_string()),
        systolic: Some(sys.to_string()),
        diastolic: Some(dia.to_string()),
        pulse: Some(pulse.to_string()),
        ..EntryForm::default()
    }
}

#[test]
fn test_log_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut repo = open(&dir);
        let mut morning = reading("152", "95", "88", "2024-05-01T08:30");
        morning.triggers = vec![TriggerKind::SleepDeprivation, TriggerKind::Weather];
        morning.sleep_hours = Some(5.0);
        morning.sleep_start = Some("23:00".to_string());
        morning.sleep_end = Some("04:00".to_string());
        morning.symptoms = vec![SymptomKind::Tinnitus];
        morning.notes = Some("slept badly".to_string());
        form::submit(&mut repo, &morning).unwrap();

        form::submit(&mut repo, &reading("128", "82", "70", "2024-05-01T20:00")).unwrap();
    }

    assert!(dir.path().join("healthTrackerData.json").exists());

    let repo = open(&dir);
    assert_eq!(repo.len(), 2);

    let entries = repo.list(None);
    assert_eq!(entries[0].systolic, 128);
    assert_eq!(entries[0].zone, Zone::Green);

    let morning = &entries[1];
    assert_eq!(morning.zone, Zone::Orange);
    assert_eq!(morning.triggers[0].detail.as_deref(), Some("5 h"));
    assert_eq!(morning.sleep.as_ref().unwrap().duration_hours, Some(5.0));
    assert_eq!(morning.notes.as_deref(), Some("slept badly"));
}

#[test]
fn test_invalid_submission_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let mut repo = open(&dir);
    form::submit(&mut repo, &reading("120", "80", "70", "2024-05-01T08:00")).unwrap();
    let before = fs::read(dir.path().join("healthTrackerData.json")).unwrap();

    let mut bad = reading("120", "80", "70", "2024-05-02T08:00");
    bad.wellness = Some(9);
    assert!(matches!(form::submit(&mut repo, &bad), Err(Error::Validation(_))));

    let after = fs::read(dir.path().join("healthTrackerData.json")).unwrap();
    assert_eq!(before, after);
    assert_eq!(repo.len(), 1);
}

#[test]
fn test_export_import_roundtrip() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();

    let mut source = open(&source_dir);
    for (i, sys) in ["118", "142", "175"].iter().enumerate() {
        let at = format!("2024-05-0{}T08:00", i + 1);
        form::submit(&mut source, &reading(sys, "80", "70", &at)).unwrap();
    }

    let json = ExportFormat::Json.render(source.log()).unwrap();
    let markdown = ExportFormat::Markdown.render(source.log()).unwrap();
    assert_eq!(markdown.matches("\n---\n").count(), 3);
    assert!(markdown.contains("🔴 Red zone"));

    let mut target = open(&target_dir);
    target
        .append(EntryDraft::builder(130, 85, 75).build())
        .unwrap();
    target.deserialize(json.as_bytes()).unwrap();

    assert_eq!(target.log(), source.log());
    drop(target);
    assert_eq!(open(&target_dir).log(), source.log());
}

#[test]
fn test_rejected_import_keeps_log() {
    let dir = TempDir::new().unwrap();
    let mut repo = open(&dir);
    form::submit(&mut repo, &reading("120", "80", "70", "2024-05-01T08:00")).unwrap();

    let err = repo.deserialize(br#"{"entries": "nope"}"#).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
    assert!(decode(b"not json").is_err());

    assert_eq!(open(&dir).len(), 1);
}

#[test]
fn test_recent_window_and_remove() {
    let dir = TempDir::new().unwrap();
    let mut repo = open(&dir);
    let tz = FixedOffset::east_opt(0).unwrap();

    let old = repo
        .append_at(
            EntryDraft::builder(120, 80, 70).build(),
            tz.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap(),
        )
        .unwrap();
    let fresh = repo
        .append_at(
            EntryDraft::builder(125, 82, 72).build(),
            tz.with_ymd_and_hms(2024, 5, 9, 8, 0, 0).unwrap(),
        )
        .unwrap();

    let now = tz.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
    let recent = repo.recent_at(10, now);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, fresh.id);

    assert!(!repo.remove(424242).unwrap());
    assert!(repo.remove(old.id).unwrap());
    assert_eq!(open(&dir).len(), 1);
}
