//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};
use vitals_types::Zone;

use crate::app::{App, View};

/// Render the header bar: entry count, latest reading and its zone.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let repo = app.repository();

    let mut spans = vec![
        Span::styled(" VITALS LOG ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(format!("{}", repo.len()), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" entries "),
    ];

    match repo.list(Some(1)).first() {
        Some(latest) => {
            spans.push(Span::raw("│ latest "));
            spans.push(Span::styled(
                format!("{} {}", latest.zone.emoji(), latest.blood_pressure()),
                app.theme.zone_style(latest.zone),
            ));
            spans.push(Span::raw(format!(" pulse {}", latest.pulse)));
        }
        None => spans.push(Span::styled(
            "│ no readings yet",
            Style::default().add_modifier(Modifier::DIM),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![Line::from(" 1:Entries "), Line::from(" 2:Trends ")];

    let selected = match app.current_view {
        View::Entries => 0,
        View::Trends => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// A pending delete prompt takes priority, then temporary messages, then
/// the key hints for the current tab.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(id) = app.pending_delete {
        let what = app
            .repository()
            .get(id)
            .map(|e| format!("{} {}", e.timestamp.format("%Y-%m-%d %H:%M"), e.blood_pressure()))
            .unwrap_or_else(|| id.to_string());
        let paragraph = Paragraph::new(format!(" Delete entry {}? y:yes any other key:no ", what))
            .style(app.theme.zone_style(Zone::Red));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Entries => "↑↓:select d:delete e:json m:markdown Tab:switch ?:help q:quit",
        View::Trends => "e:json m:markdown Tab:switch ?:help q:quit",
    };
    let status = format!(
        " {} | {} | {}",
        app.current_view.label(),
        app.repository().description(),
        controls
    );

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(" Navigation", bold)]),
        Line::from("  ←/→ h/l Tab  Switch tabs"),
        Line::from("  1 / 2        Entries / Trends"),
        Line::from("  ↑/↓ j/k      Select entry"),
        Line::from("  PgUp/PgDn    Jump 10 entries"),
        Line::from("  Home/End     First/last entry"),
        Line::from(""),
        Line::from(vec![Span::styled(" Actions", bold)]),
        Line::from("  d            Delete selected entry"),
        Line::from("  e            Export JSON"),
        Line::from("  m            Export Markdown"),
        Line::from("  q / Esc      Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 19u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
