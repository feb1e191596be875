//! Renderer-independent chart description.
//!
//! A [`LineChart`] is everything a plotting backend needs to draw one graph:
//! one series per selected column against the shared time axis, labels, and
//! the visible window. The window only restricts what is shown; every series
//! keeps all of its points.

use eframe::egui::Color32;

use crate::color::ChannelColors;
use crate::data::model::Table;
use crate::error::ChartError;

/// X-axis label used by every chart.
pub const TIME_AXIS_LABEL: &str = "Time [s]";

/// Closed interval on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            AxisRange { min: a, max: b }
        } else {
            AxisRange { min: b, max: a }
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp `v` into the range. NaN limits are ignored.
    pub fn clamp(&self, v: f64) -> f64 {
        v.min(self.max).max(self.min)
    }
}

/// One named line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: Color32,
    /// `[time, value]` pairs; missing values are left out.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: String,
    pub show_legend: bool,
    pub series: Vec<LineSeries>,
    /// Visible x window.
    pub x_range: AxisRange,
}

impl LineChart {
    /// Build a chart for `columns` of a processed table.
    ///
    /// `columns` must be non-empty and name channels of `table`.
    pub fn build(
        table: &Table,
        columns: &[String],
        title: &str,
        y_label: &str,
        x_range: AxisRange,
        colors: &ChannelColors,
    ) -> Result<Self, ChartError> {
        if columns.is_empty() {
            return Err(ChartError::NoColumns);
        }

        let time = table.numeric_column(table.time_column())?;
        let mut series = Vec::with_capacity(columns.len());
        for column in columns {
            if column == table.time_column() || !table.has_column(column) {
                return Err(ChartError::UnknownColumn(column.clone()));
            }
            let values = table.numeric_column(column)?;
            let points = time
                .iter()
                .zip(values.iter())
                .filter_map(|(t, v)| Some([(*t)?, (*v)?]))
                .collect();
            series.push(LineSeries {
                name: column.clone(),
                color: colors.color_for(column),
                points,
            });
        }

        Ok(LineChart {
            title: title.to_string(),
            x_label: TIME_AXIS_LABEL,
            y_label: y_label.to_string(),
            show_legend: true,
            series,
            x_range,
        })
    }

    /// Y window fitted to the values visible inside `x_range`, with a 5%
    /// margin. Flat data gets a unit band; no visible data gets `[-1, 1]`.
    pub fn y_range(&self) -> AxisRange {
        let visible = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|[t, _]| self.x_range.contains(*t))
            .map(|[_, v]| *v)
            .filter(|v| v.is_finite());

        let bounds = visible.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

        match bounds {
            None => AxisRange::new(-1.0, 1.0),
            Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => {
                AxisRange::new(lo - 0.5, hi + 0.5)
            }
            Some((lo, hi)) => {
                let margin = (hi - lo) * 0.05;
                AxisRange::new(lo - margin, hi + margin)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::loader::parse_str;

    fn table() -> Table {
        parse_str("time,Va,Ia\n0,1,10\n1,2,\n2,3,30\n3,40,40\n").unwrap()
    }

    fn colors(t: &Table) -> ChannelColors {
        ChannelColors::new(t.channel_names())
    }

    #[test]
    fn one_series_per_column_in_order() {
        let t = table();
        let cols = vec!["Ia".to_string(), "Va".to_string()];
        let chart =
            LineChart::build(&t, &cols, "Phase A", "Voltage[V]", AxisRange::new(0.0, 3.0), &colors(&t))
                .unwrap();

        assert_eq!(chart.title, "Phase A");
        assert_eq!(chart.x_label, "Time [s]");
        assert_eq!(chart.y_label, "Voltage[V]");
        assert!(chart.show_legend);
        let names: Vec<&str> = chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Ia", "Va"]);
        // missing Ia cell at t=1 is skipped
        assert_eq!(chart.series[0].points, vec![[0.0, 10.0], [2.0, 30.0], [3.0, 40.0]]);
    }

    #[test]
    fn single_series_still_has_legend() {
        let t = table();
        let chart = LineChart::build(
            &t,
            &["Va".to_string()],
            "t",
            "y",
            AxisRange::new(0.0, 3.0),
            &colors(&t),
        )
        .unwrap();
        assert!(chart.show_legend);
        assert_eq!(chart.series.len(), 1);
    }

    #[test]
    fn x_range_clamps_view_not_data() {
        let t = table();
        let full = LineChart::build(&t, &["Va".to_string()], "", "", AxisRange::new(0.0, 3.0), &colors(&t))
            .unwrap();
        let zoomed = LineChart::build(&t, &["Va".to_string()], "", "", AxisRange::new(0.5, 2.0), &colors(&t))
            .unwrap();

        assert_eq!(zoomed.series, full.series);
        assert_eq!(zoomed.x_range, AxisRange { min: 0.5, max: 2.0 });

        // Only Va = 2 and 3 are inside [0.5, 2]
        let y = zoomed.y_range();
        assert_relative_eq!(y.min, 2.0 - 0.05);
        assert_relative_eq!(y.max, 3.0 + 0.05);
    }

    #[test]
    fn flat_and_empty_windows() {
        let t = parse_str("time,V\n0,4\n1,4\n").unwrap();
        let chart = LineChart::build(&t, &["V".to_string()], "", "", AxisRange::new(0.0, 1.0), &colors(&t))
            .unwrap();
        assert_eq!(chart.y_range(), AxisRange::new(3.5, 4.5));

        let outside = LineChart { x_range: AxisRange::new(5.0, 6.0), ..chart };
        assert_eq!(outside.y_range(), AxisRange::new(-1.0, 1.0));
    }

    #[test]
    fn rejects_empty_and_unknown_columns() {
        let t = table();
        let c = colors(&t);
        let r = AxisRange::new(0.0, 1.0);
        assert!(matches!(
            LineChart::build(&t, &[], "", "", r, &c),
            Err(ChartError::NoColumns)
        ));
        assert!(matches!(
            LineChart::build(&t, &["Torque".to_string()], "", "", r, &c),
            Err(ChartError::UnknownColumn(name)) if name == "Torque"
        ));
        assert!(matches!(
            LineChart::build(&t, &["time".to_string()], "", "", r, &c),
            Err(ChartError::UnknownColumn(_))
        ));
    }

    #[test]
    fn axis_range_orders_and_clamps() {
        let r = AxisRange::new(5.0, 1.0);
        assert_eq!(r, AxisRange { min: 1.0, max: 5.0 });
        assert_relative_eq!(r.span(), 4.0);
        assert_relative_eq!(r.clamp(9.0), 5.0);
        assert_relative_eq!(r.clamp(-9.0), 1.0);
    }

    #[test]
    fn clamp_with_nan_limits_does_not_panic() {
        let r = AxisRange { min: f64::NAN, max: f64::NAN };
        assert_relative_eq!(r.clamp(3.0), 3.0);
        let upper_only = AxisRange { min: f64::NAN, max: 1.0 };
        assert_relative_eq!(upper_only.clamp(3.0), 1.0);
    }
}
