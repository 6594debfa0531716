//! Markdown export.
//!
//! One `##` section per entry. Fields always appear in the same order and
//! optional groups are left out entirely when empty.

use std::fmt::{self, Write};

use vitals_types::{Entry, Medication, Sleep, Symptom, Trigger};

use super::format_datetime;

/// Title line of every exported document.
pub const TITLE: &str = "# Health log";

/// Render entries as a Markdown document, in the order given.
pub fn render(entries: &[Entry]) -> String {
    Document(entries).to_string()
}

struct Document<'a>(&'a [Entry]);

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n", TITLE)?;
        self.0.iter().try_for_each(|entry| write_entry(f, entry))
    }
}

fn write_entry(f: &mut impl Write, entry: &Entry) -> fmt::Result {
    writeln!(f, "## {}\n", format_datetime(&entry.timestamp))?;
    writeln!(f, "**BP:** {} mmHg", entry.blood_pressure())?;
    writeln!(f, "**Pulse:** {} bpm", entry.pulse)?;
    writeln!(f, "**Zone:** {} {}\n", entry.zone.emoji(), entry.zone.label())?;

    if let Some(sleep) = entry.sleep.as_ref().filter(|s| !s.is_empty()) {
        write_sleep(f, sleep)?;
    }

    writeln!(f, "**Wellness:** {}/5\n", entry.wellness)?;

    write_list(f, "Triggers", &entry.triggers, trigger_line)?;
    write_list(f, "Symptoms", &entry.symptoms, symptom_line)?;
    write_list(f, "Medications", &entry.medications, medication_line)?;

    if let Some(notes) = entry.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        writeln!(f, "**Notes:** {}\n", notes)?;
    }

    f.write_str("---\n\n")
}

fn write_sleep(f: &mut impl Write, sleep: &Sleep) -> fmt::Result {
    let or_unknown = |value: Option<String>| value.unwrap_or_else(|| "not specified".to_string());

    f.write_str("**Sleep:**\n")?;
    writeln!(f, "- Fell asleep: {}", or_unknown(sleep.start.map(|t| t.to_string())))?;
    writeln!(f, "- Woke up: {}", or_unknown(sleep.end.map(|t| t.to_string())))?;
    if let Some(duration) = sleep.duration() {
        writeln!(f, "- Duration: {}", duration)?;
    }
    writeln!(f, "- Quality: {}\n", or_unknown(sleep.quality.map(|q| format!("{}/5", q))))
}

fn write_list<T>(
    f: &mut impl Write,
    heading: &str,
    items: &[T],
    line: fn(&T) -> String,
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "**{}:**", heading)?;
    for item in items {
        writeln!(f, "- {}", line(item))?;
    }
    f.write_char('\n')
}

fn trigger_line(trigger: &Trigger) -> String {
    match &trigger.detail {
        Some(detail) => format!("{} ({})", trigger.label, detail),
        None => trigger.label.clone(),
    }
}

fn symptom_line(symptom: &Symptom) -> String {
    let mut line = symptom.label.clone();
    if let Some(detail) = &symptom.detail {
        line.push_str(&format!(": {}", detail));
    }
    if let Some(intensity) = symptom.intensity {
        line.push_str(&format!(" (intensity: {}/5)", intensity));
    }
    line
}

fn medication_line(medication: &Medication) -> String {
    let mut line = medication.label.clone();
    if let Some(detail) = &medication.detail {
        line.push_str(&format!(": {}", detail));
    }
    if let Some(dose) = medication.dose {
        line.push_str(&format!(" ({} mg)", dose));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::fixtures;

    #[test]
    fn test_empty_document() {
        assert_eq!(render(&[]), "# Health log\n\n");
    }

    #[test]
    fn test_plain_entry_omits_optional_groups() {
        let md = render(&[fixtures::plain(1, 3, 120, 80, 70)]);
        let expected = "# Health log\n\n\
            ## 2024-05-03 08:30\n\n\
            **BP:** 120/80 mmHg\n\
            **Pulse:** 70 bpm\n\
            **Zone:** 🟢 Green zone\n\n\
            **Wellness:** 4/5\n\n\
            ---\n\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_detailed_entry_field_order() {
        let md = render(&[fixtures::detailed(1, 2)]);

        let order = [
            "**BP:** 152/95 mmHg",
            "**Pulse:** 88 bpm",
            "**Zone:** 🟠 Orange zone",
            "**Sleep:**",
            "- Fell asleep: 23:00",
            "- Woke up: 05:30",
            "- Duration: 6h 30m",
            "- Quality: 2/5",
            "**Wellness:** 2/5",
            "**Triggers:**",
            "- Sleep deprivation (5 h)",
            "- Weather change",
            "**Symptoms:**",
            "- Occipital pain (intensity: 3/5)",
            "- Other: dry mouth",
            "**Medications:**",
            "- Aminalon (500 mg)",
            "- Other: chamomile tea",
            "**Notes:** headache in the evening",
            "---",
        ];

        let mut cursor = 0;
        for needle in order {
            let found = md[cursor..].find(needle).unwrap_or_else(|| panic!("missing {needle:?}"));
            cursor += found + needle.len();
        }
    }

    #[test]
    fn test_sleep_with_only_quality() {
        let mut entry = fixtures::plain(1, 3, 120, 80, 70);
        entry.sleep = Some(Sleep::new(None, None, Some(4)));
        let md = render(&[entry]);
        assert!(md.contains("- Fell asleep: not specified\n- Woke up: not specified\n- Quality: 4/5"));
        assert!(!md.contains("Duration"));
    }

    #[test]
    fn test_one_section_per_entry() {
        let entries = vec![fixtures::plain(1, 3, 120, 80, 70), fixtures::plain(2, 4, 130, 80, 70)];
        let md = render(&entries);
        assert_eq!(md.matches("\n## ").count(), 2);
        assert_eq!(md.matches("---\n").count(), 2);
    }
}
