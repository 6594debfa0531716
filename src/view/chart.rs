//! Numeric series for BP and pulse charts.

use vitals_types::Entry;

/// Default y-axis range for the blood pressure chart.
pub const BP_AXIS: [f64; 2] = [60.0, 180.0];
/// Default y-axis range for the pulse chart.
pub const PULSE_AXIS: [f64; 2] = [50.0, 140.0];

/// Chart data: every series has one value per label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartSeries {
    /// `DD.MM` date of each point.
    pub labels: Vec<String>,
    pub systolic: Vec<u16>,
    pub diastolic: Vec<u16>,
    pub pulse: Vec<u16>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when there is nothing to plot; callers fall back to table-only display.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(index, value)` pairs suitable for an x/y plot.
    pub fn points(values: &[u16]) -> Vec<(f64, f64)> {
        values.iter().enumerate().map(|(i, &v)| (i as f64, f64::from(v))).collect()
    }

    /// Widen `default` so every value in `values` is visible.
    pub fn axis_bounds(default: [f64; 2], values: &[&[u16]]) -> [f64; 2] {
        let (min, max) = values
            .iter()
            .flat_map(|s| s.iter())
            .fold((default[0], default[1]), |(lo, hi), &v| {
                let v = f64::from(v);
                (lo.min(v), hi.max(v))
            });
        [(min / 10.0).floor() * 10.0, (max / 10.0).ceil() * 10.0]
    }
}

/// Build chart series from entries, in the order given.
///
/// Pass entries already sorted ascending (see
/// [`Repository::recent`](crate::Repository::recent)).
pub fn series(entries: &[Entry]) -> ChartSeries {
    let mut out = ChartSeries::default();
    for entry in entries {
        out.labels.push(entry.timestamp.format("%d.%m").to_string());
        out.systolic.push(entry.systolic);
        out.diastolic.push(entry.diastolic);
        out.pulse.push(entry.pulse);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::fixtures;

    #[test]
    fn test_series_aligned() {
        let entries = vec![fixtures::plain(1, 3, 130, 85, 70), fixtures::plain(2, 4, 145, 92, 90)];
        let s = series(&entries);

        assert_eq!(s.labels, vec!["03.05", "04.05"]);
        assert_eq!(s.systolic, vec![130, 145]);
        assert_eq!(s.diastolic, vec![85, 92]);
        assert_eq!(s.pulse, vec![70, 90]);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_empty_series() {
        let s = series(&[]);
        assert!(s.is_empty());
        assert!(ChartSeries::points(&s.pulse).is_empty());
    }

    #[test]
    fn test_points() {
        assert_eq!(ChartSeries::points(&[120, 130]), vec![(0.0, 120.0), (1.0, 130.0)]);
    }

    #[test]
    fn test_axis_bounds_widen_to_fit() {
        assert_eq!(ChartSeries::axis_bounds(BP_AXIS, &[&[120, 140]]), BP_AXIS);
        assert_eq!(ChartSeries::axis_bounds(BP_AXIS, &[&[195], &[55]]), [50.0, 200.0]);
        assert_eq!(ChartSeries::axis_bounds(PULSE_AXIS, &[]), PULSE_AXIS);
    }
}
