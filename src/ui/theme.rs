//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;
use vitals_types::Zone;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    pub green_zone: Color,
    pub yellow_zone: Color,
    pub orange_zone: Color,
    pub red_zone: Color,
    /// Series colors on the trend charts.
    pub systolic: Color,
    pub diastolic: Color,
    pub pulse: Color,
    /// Normal-range reference lines.
    pub reference: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            green_zone: Color::Green,
            yellow_zone: Color::Yellow,
            orange_zone: Color::Rgb(255, 165, 0),
            red_zone: Color::Red,
            systolic: Color::LightRed,
            diastolic: Color::LightBlue,
            pulse: Color::LightGreen,
            reference: Color::DarkGray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            green_zone: Color::Green,
            yellow_zone: Color::Rgb(180, 140, 0),
            orange_zone: Color::Rgb(215, 110, 0),
            red_zone: Color::Red,
            systolic: Color::Red,
            diastolic: Color::Blue,
            pulse: Color::Green,
            reference: Color::Gray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn zone_color(&self, zone: Zone) -> Color {
        match zone {
            Zone::Green => self.green_zone,
            Zone::Yellow => self.yellow_zone,
            Zone::Orange => self.orange_zone,
            Zone::Red => self.red_zone,
        }
    }

    /// Style for a zone cell; red is bold.
    pub fn zone_style(&self, zone: Zone) -> Style {
        let style = Style::default().fg(self.zone_color(zone));
        if zone == Zone::Red {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}
