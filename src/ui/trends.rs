//! Trend charts: blood pressure and pulse over the last days.
//!
//! When there is nothing to plot, or not enough room for two charts, the
//! entries table is shown instead with a one-line notice above it.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::entries;
use crate::view::chart::{BP_AXIS, PULSE_AXIS};
use crate::view::ChartSeries;

/// Below this the two stacked charts become unreadable.
const MIN_CHART_WIDTH: u16 = 40;
const MIN_CHART_HEIGHT: u16 = 14;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.chart_series();

    let notice = if series.is_empty() {
        Some(format!(
            "No readings in the last {} days; showing the table instead.",
            app.options.chart_days
        ))
    } else if area.width < MIN_CHART_WIDTH || area.height < MIN_CHART_HEIGHT {
        Some("Not enough room for charts; showing the table instead.".to_string())
    } else {
        None
    };

    if let Some(notice) = notice {
        let [notice_area, table_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
        frame.render_widget(
            Paragraph::new(notice).style(Style::default().add_modifier(Modifier::DIM)),
            notice_area,
        );
        entries::render(frame, app, table_area);
        return;
    }

    let [bp_area, pulse_area] =
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    render_bp_chart(frame, app, &series, bp_area);
    render_pulse_chart(frame, app, &series, pulse_area);
}

/// X axis shared by both charts: one step per reading, first and last date labelled.
fn x_axis(series: &ChartSeries) -> Axis<'static> {
    let last = series.len().saturating_sub(1);
    let mut labels = vec![Span::raw(series.labels[0].clone())];
    if last > 0 {
        labels.push(Span::raw(series.labels[last].clone()));
    }
    Axis::default().bounds([0.0, last.max(1) as f64]).labels(labels)
}

fn y_axis(bounds: [f64; 2]) -> Axis<'static> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    Axis::default().bounds(bounds).labels(vec![
        Span::raw(format!("{:.0}", bounds[0])),
        Span::raw(format!("{:.0}", mid)),
        Span::raw(format!("{:.0}", bounds[1])),
    ])
}

fn line(data: &[(f64, f64)], color: Color) -> Dataset<'_> {
    Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

fn block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_bp_chart(frame: &mut Frame, app: &App, series: &ChartSeries, area: Rect) {
    let systolic = ChartSeries::points(&series.systolic);
    let diastolic = ChartSeries::points(&series.diastolic);

    // Normal systolic band, drawn edge to edge.
    let x_end = series.len().saturating_sub(1).max(1) as f64;
    let [low, high] = app.repository().profile().normal_systolic;
    let band_low = [(0.0, f64::from(low)), (x_end, f64::from(low))];
    let band_high = [(0.0, f64::from(high)), (x_end, f64::from(high))];

    let bounds = ChartSeries::axis_bounds(
        BP_AXIS,
        &[series.systolic.as_slice(), series.diastolic.as_slice()],
    );

    let datasets = vec![
        line(&systolic, app.theme.systolic).name("Systolic"),
        line(&diastolic, app.theme.diastolic).name("Diastolic"),
        line(&band_low, app.theme.reference).name("Normal range"),
        line(&band_high, app.theme.reference),
    ];

    let chart = Chart::new(datasets)
        .block(block(app, " Blood pressure, mmHg "))
        .x_axis(x_axis(series))
        .y_axis(y_axis(bounds));

    frame.render_widget(chart, area);
}

fn render_pulse_chart(frame: &mut Frame, app: &App, series: &ChartSeries, area: Rect) {
    let pulse = ChartSeries::points(&series.pulse);
    let bounds = ChartSeries::axis_bounds(PULSE_AXIS, &[series.pulse.as_slice()]);

    let datasets = vec![line(&pulse, app.theme.pulse).name("Pulse")];

    let chart = Chart::new(datasets)
        .block(block(app, " Pulse, bpm "))
        .x_axis(x_axis(series))
        .y_axis(y_axis(bounds));

    frame.render_widget(chart, area);
}
