//! Tabular rows with a fixed column set.

use vitals_types::{Entry, Zone};

use super::{format_datetime, format_sleep};

/// Column headings, in display order.
pub const COLUMNS: [&str; 6] = ["Date & time", "BP", "Pulse", "Zone", "Sleep", "Wellness"];

/// One entry flattened to display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Id of the source entry (not a display column).
    pub id: u64,
    pub datetime: String,
    pub blood_pressure: String,
    pub pulse: String,
    pub zone: Zone,
    pub sleep: String,
    pub wellness: String,
}

impl TableRow {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            datetime: format_datetime(&entry.timestamp),
            blood_pressure: entry.blood_pressure(),
            pulse: entry.pulse.to_string(),
            zone: entry.zone,
            sleep: format_sleep(entry.sleep.as_ref()),
            wellness: format!("{}/5", entry.wellness),
        }
    }

    /// Zone cell text, e.g. `"🟠 orange"`.
    pub fn zone_cell(&self) -> String {
        format!("{} {}", self.zone.emoji(), self.zone)
    }

    /// Cells in [`COLUMNS`] order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.datetime.clone(),
            self.blood_pressure.clone(),
            self.pulse.clone(),
            self.zone_cell(),
            self.sleep.clone(),
            self.wellness.clone(),
        ]
    }
}

/// Convert entries to rows, preserving order.
pub fn rows(entries: &[Entry]) -> Vec<TableRow> {
    entries.iter().map(TableRow::from_entry).collect()
}

/// Lay rows out as aligned plain text, one line per entry.
///
/// With `with_ids`, an extra leading `ID` column is shown so entries can
/// be referenced by later commands.
pub fn render_plain(entries: &[Entry], with_ids: bool) -> String {
    if entries.is_empty() {
        return "No entries yet. Add the first one with `vitals-log add`.\n".to_string();
    }

    let mut header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut lines: Vec<Vec<String>> = rows(entries)
        .into_iter()
        .map(|row| {
            let mut cells = row.cells().to_vec();
            if with_ids {
                cells.insert(0, row.id.to_string());
            }
            cells
        })
        .collect();
    if with_ids {
        header.insert(0, "ID".to_string());
    }
    lines.insert(0, header);

    let widths: Vec<usize> = (0..lines[0].len())
        .map(|col| lines.iter().map(|l| l[col].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for line in &lines {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        out.push_str(padded.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::fixtures;

    #[test]
    fn test_row_columns() {
        let row = TableRow::from_entry(&fixtures::detailed(1, 2));
        assert_eq!(
            row.cells(),
            [
                "2024-05-02 09:30".to_string(),
                "152/95".to_string(),
                "88".to_string(),
                "🟠 orange".to_string(),
                "6h 30m q2/5".to_string(),
                "2/5".to_string(),
            ]
        );
    }

    #[test]
    fn test_rows_preserve_order() {
        let entries = vec![fixtures::plain(2, 5, 120, 80, 70), fixtures::plain(1, 4, 175, 80, 70)];
        let ids: Vec<u64> = rows(&entries).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_render_plain_empty() {
        assert!(render_plain(&[], true).starts_with("No entries"));
    }

    #[test]
    fn test_render_plain_aligns_columns() {
        let entries = vec![fixtures::plain(17, 5, 120, 80, 70), fixtures::plain(3, 4, 175, 80, 70)];
        let out = render_plain(&entries, true);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  Date & time"));
        assert!(lines[1].starts_with("17  2024-05-05 08:30  120/80"));
        assert!(lines[2].starts_with("3   2024-05-04 08:30  175/80"));
        assert!(lines[2].contains("🔴 red"));
    }

    #[test]
    fn test_render_plain_without_ids() {
        let out = render_plain(&[fixtures::plain(9, 5, 120, 80, 70)], false);
        assert!(out.starts_with("Date & time"));
    }
}
