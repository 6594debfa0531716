//! Entries table.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::view::table::{self, COLUMNS};

/// Render the latest entries, newest first, with the selection highlighted.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let entries = app.entries();

    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c)))
        .height(1)
        .style(app.theme.header);

    let rows: Vec<Row> = table::rows(entries)
        .into_iter()
        .map(|row| {
            let zone_style = app.theme.zone_style(row.zone);
            let [datetime, bp, pulse, zone, sleep, wellness] = row.cells();
            Row::new(vec![
                Cell::from(datetime),
                Cell::from(bp).style(zone_style),
                Cell::from(pulse),
                Cell::from(zone).style(zone_style),
                Cell::from(sleep),
                Cell::from(wellness),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16), // Date & time
        Constraint::Min(7),  // BP
        Constraint::Min(5),  // Pulse
        Constraint::Min(10), // Zone
        Constraint::Fill(1), // Sleep
        Constraint::Min(8),  // Wellness
    ];

    let selected = app.selected_index.min(entries.len().saturating_sub(1));

    let position_info = if entries.is_empty() {
        String::new()
    } else {
        format!(" [{}/{}]", selected + 1, entries.len())
    };
    let title = format!(
        " Entries ({} of {}){} ",
        entries.len(),
        app.repository().len(),
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !entries.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
