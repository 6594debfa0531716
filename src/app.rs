//! Dashboard state and navigation logic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;
use vitals_types::Entry;

use crate::repository::Repository;
use crate::ui::Theme;
use crate::view::{self, ChartSeries, ExportFormat};

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

/// The current tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Latest entries as a table.
    Entries,
    /// BP and pulse charts over recent days.
    Trends,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Entries => View::Trends,
            View::Trends => View::Entries,
        }
    }

    /// With two tabs, previous and next coincide.
    pub fn prev(self) -> Self {
        self.next()
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Entries => "Entries",
            View::Trends => "Trends",
        }
    }
}

/// Knobs the dashboard takes from settings.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Rows in the entries table.
    pub table_limit: usize,
    /// Days of history in the charts.
    pub chart_days: u32,
    /// Directory that `e`/`m` exports are written to.
    pub export_dir: PathBuf,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            table_limit: 10,
            chart_days: 10,
            export_dir: PathBuf::from("."),
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    repo: Repository,
    pub options: DashboardOptions,

    /// Index into [`App::entries`].
    pub selected_index: usize,
    /// Entry awaiting a y/n answer before deletion.
    pub pending_delete: Option<u64>,

    pub theme: Theme,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(repo: Repository, options: DashboardOptions) -> Self {
        Self {
            running: true,
            current_view: View::Entries,
            show_help: false,
            repo,
            options,
            selected_index: 0,
            pending_delete: None,
            theme: Theme::dark(),
            status_message: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Rows of the entries table, newest first.
    pub fn entries(&self) -> &[Entry] {
        self.repo.list(Some(self.options.table_limit))
    }

    /// Entries within the chart window, oldest first.
    pub fn trend_entries(&self) -> Vec<Entry> {
        self.repo.recent(self.options.chart_days)
    }

    pub fn chart_series(&self) -> ChartSeries {
        view::chart::series(&self.trend_entries())
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries().get(self.selected_index)
    }

    /// Set a temporary status message.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// The current status message, unless it has expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_TTL => Some(msg),
            _ => None,
        }
    }

    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    pub fn select_next_n(&mut self, n: usize) {
        let max = self.entries().len().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.entries().len().saturating_sub(1);
    }

    /// Ask for confirmation before deleting the selected entry.
    pub fn request_delete(&mut self) {
        if self.current_view != View::Entries {
            return;
        }
        match self.selected_entry() {
            Some(entry) => self.pending_delete = Some(entry.id),
            None => self.set_status_message("Nothing to delete".to_string()),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the entry awaiting confirmation.
    ///
    /// A storage failure leaves the entry in place and is reported in the
    /// status bar.
    pub fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        match self.repo.remove(id) {
            Ok(true) => {
                info!(id, "entry deleted from dashboard");
                self.set_status_message("Entry deleted".to_string());
            }
            Ok(false) => self.set_status_message("Entry no longer exists".to_string()),
            Err(e) => self.set_status_message(format!("Delete failed: {}", e)),
        }

        let max = self.entries().len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max);
    }

    /// Export the whole log into the export directory.
    pub fn export(&mut self, format: ExportFormat) {
        let path = self.options.export_dir.join(format.default_file_name());
        match self.export_to(format, &path) {
            Ok(()) => self.set_status_message(format!("Exported to {}", path.display())),
            Err(e) => self.set_status_message(format!("Export failed: {:#}", e)),
        }
    }

    fn export_to(&self, format: ExportFormat, path: &Path) -> Result<()> {
        let content = format.render(self.repo.log())?;
        std::fs::write(path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;
        info!(path = %path.display(), %format, "exported log");
        Ok(())
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeDelta;
    use tempfile::TempDir;
    use vitals_types::EntryDraft;

    fn app_with(readings: &[(u16, u16, u16)]) -> (App, MemoryStorage) {
        let storage = MemoryStorage::new();
        let mut repo = Repository::open(Box::new(storage.clone()), "log").unwrap();
        let start = repo.now() - TimeDelta::hours(readings.len() as i64);
        for (i, &(sys, dia, pulse)) in readings.iter().enumerate() {
            let at = start + TimeDelta::hours(i as i64);
            repo.append_at(EntryDraft::builder(sys, dia, pulse).build(), at).unwrap();
        }
        let options = DashboardOptions { table_limit: 3, ..DashboardOptions::default() };
        (App::new(repo, options), storage)
    }

    #[test]
    fn test_view_cycle() {
        let (mut app, _) = app_with(&[]);
        assert_eq!(app.current_view, View::Entries);
        app.next_view();
        assert_eq!(app.current_view, View::Trends);
        app.prev_view();
        assert_eq!(app.current_view, View::Entries);
    }

    #[test]
    fn test_table_respects_limit() {
        let (app, _) = app_with(&[(120, 80, 70), (130, 85, 72), (140, 88, 75), (150, 90, 80)]);
        assert_eq!(app.entries().len(), 3);
        assert_eq!(app.entries()[0].systolic, 150);
        assert_eq!(app.trend_entries().len(), 4);
        assert_eq!(app.chart_series().systolic, vec![120, 130, 140, 150]);
    }

    #[test]
    fn test_selection_is_clamped() {
        let (mut app, _) = app_with(&[(120, 80, 70), (130, 85, 72)]);
        app.select_next_n(10);
        assert_eq!(app.selected_index, 1);
        app.select_prev_n(10);
        assert_eq!(app.selected_index, 0);
        app.select_last();
        assert_eq!(app.selected_entry().unwrap().systolic, 120);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut app, storage) = app_with(&[(120, 80, 70), (130, 85, 72)]);
        let writes = storage.writes();

        app.request_delete();
        assert!(app.pending_delete.is_some());
        app.cancel_delete();
        assert_eq!(app.repository().len(), 2);
        assert_eq!(storage.writes(), writes);

        app.select_last();
        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.repository().len(), 1);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.get_status_message(), Some("Entry deleted"));
    }

    #[test]
    fn test_failed_delete_keeps_entry() {
        let (mut app, storage) = app_with(&[(120, 80, 70)]);
        storage.set_available(false);

        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.repository().len(), 1);
        assert!(app.get_status_message().unwrap().starts_with("Delete failed"));
    }

    #[test]
    fn test_delete_only_from_entries_tab() {
        let (mut app, _) = app_with(&[(120, 80, 70)]);
        app.set_view(View::Trends);
        app.request_delete();
        assert!(app.pending_delete.is_none());
    }

    #[test]
    fn test_export_writes_default_file_names() {
        let dir = TempDir::new().unwrap();
        let (mut app, _) = app_with(&[(152, 95, 88)]);
        app.options.export_dir = dir.path().to_path_buf();

        app.export(ExportFormat::Markdown);
        app.export(ExportFormat::Json);

        let md = std::fs::read_to_string(dir.path().join("daily-log.md")).unwrap();
        assert!(md.contains("152/95"));
        let json = std::fs::read(dir.path().join("health-data.json")).unwrap();
        assert_eq!(crate::repository::decode(&json).unwrap().len(), 1);
    }
}
