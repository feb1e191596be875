use std::fmt;

use crate::chart::{AxisRange, LineChart};
use crate::color::ChannelColors;
use crate::data::model::Table;
use crate::error::ChartError;

/// Upper bound on the number of graphs in a session.
pub const MAX_GRAPHS: usize = 10;
/// Number of graphs shown right after a successful submission.
pub const DEFAULT_GRAPHS: usize = 3;

// ---------------------------------------------------------------------------
// Y-axis label presets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YAxisPreset {
    #[default]
    Voltage,
    Current,
    SpeedRpm,
    AngleRad,
    AngleDeg,
    SpeedRadPerSec,
    /// Free text, see [`GraphSpec::custom_label`].
    Custom,
}

impl YAxisPreset {
    pub const ALL: [YAxisPreset; 7] = [
        YAxisPreset::Voltage,
        YAxisPreset::Current,
        YAxisPreset::SpeedRpm,
        YAxisPreset::AngleRad,
        YAxisPreset::AngleDeg,
        YAxisPreset::SpeedRadPerSec,
        YAxisPreset::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            YAxisPreset::Voltage => "Voltage[V]",
            YAxisPreset::Current => "Current[A]",
            YAxisPreset::SpeedRpm => "Speed[rpm]",
            YAxisPreset::AngleRad => "angle[rad]",
            YAxisPreset::AngleDeg => "angle[deg]",
            YAxisPreset::SpeedRadPerSec => "Speed[rad/s]",
            YAxisPreset::Custom => "Custom",
        }
    }
}

impl fmt::Display for YAxisPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// GraphSpec – one graph slot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GraphSpec {
    /// Selected channels, in selection order.
    pub selected: Vec<String>,
    pub y_axis: YAxisPreset,
    /// Only used when `y_axis` is [`YAxisPreset::Custom`].
    pub custom_label: String,
    pub title: String,
}

impl GraphSpec {
    /// Fresh spec for the 0-based `slot`.
    pub fn new(slot: usize) -> Self {
        Self {
            selected: Vec::new(),
            y_axis: YAxisPreset::default(),
            custom_label: String::new(),
            title: format!("Graph {}: Selected Columns", slot + 1),
        }
    }

    /// Effective y-axis label. An empty custom label falls back to "Custom".
    pub fn y_axis_label(&self) -> String {
        match self.y_axis {
            YAxisPreset::Custom if !self.custom_label.is_empty() => {
                self.custom_label.clone()
            }
            preset => preset.label().to_string(),
        }
    }

    pub fn is_selected(&self, column: &str) -> bool {
        self.selected.iter().any(|c| c == column)
    }

    /// Add or remove `column` from the selection.
    pub fn set_selected(&mut self, column: &str, on: bool) {
        if on {
            if !self.is_selected(column) {
                self.selected.push(column.to_string());
            }
        } else {
            self.selected.retain(|c| c != column);
        }
    }
}

// ---------------------------------------------------------------------------
// SessionConfig – every graph slot plus the shared x-range
// ---------------------------------------------------------------------------

/// Graph configuration for one processed table. Built fresh on every
/// submission.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    num_graphs: usize,
    /// Always `MAX_GRAPHS` slots so hidden slots keep their settings.
    slots: Vec<GraphSpec>,
    columns: Vec<String>,
    x_limits: AxisRange,
    x_range: AxisRange,
}

/// A graph that was not rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphWarning {
    pub slot: usize,
    pub message: String,
}

impl GraphWarning {
    pub fn empty_selection(slot: usize) -> Self {
        Self {
            slot,
            message: format!("Please select at least one column for Graph {}.", slot + 1),
        }
    }
}

/// Renderable charts (with their 0-based slot) plus soft warnings.
#[derive(Debug, Clone, Default)]
pub struct RenderPlan {
    pub charts: Vec<(usize, LineChart)>,
    pub warnings: Vec<GraphWarning>,
}

impl SessionConfig {
    pub fn new(processed: &Table) -> Self {
        let (lo, hi) = processed.time_bounds().unwrap_or((0.0, 0.0));
        let x_limits = AxisRange::new(lo, hi);
        Self {
            num_graphs: DEFAULT_GRAPHS,
            slots: (0..MAX_GRAPHS).map(GraphSpec::new).collect(),
            columns: processed.channel_names().to_vec(),
            x_limits,
            x_range: x_limits,
        }
    }

    pub fn num_graphs(&self) -> usize {
        self.num_graphs
    }

    /// Set the number of active graphs, clamped to `1..=MAX_GRAPHS`.
    pub fn set_num_graphs(&mut self, n: usize) {
        self.num_graphs = n.clamp(1, MAX_GRAPHS);
    }

    /// The active graph specs.
    pub fn graphs(&self) -> &[GraphSpec] {
        &self.slots[..self.num_graphs]
    }

    /// Mutable access to an active slot.
    pub fn graph_mut(&mut self, slot: usize) -> Option<&mut GraphSpec> {
        self.slots[..self.num_graphs].get_mut(slot)
    }

    /// Channels that may be selected.
    pub fn available_columns(&self) -> &[String] {
        &self.columns
    }

    /// Toggle a channel in a slot. Unknown channels and inactive slots are
    /// ignored.
    pub fn select_column(&mut self, slot: usize, column: &str, on: bool) {
        if !self.columns.iter().any(|c| c == column) {
            log::warn!("Ignoring selection of unknown column '{column}'");
            return;
        }
        if let Some(graph) = self.graph_mut(slot) {
            graph.set_selected(column, on);
        }
    }

    /// `[min(time), max(time)]` of the processed table.
    pub fn x_limits(&self) -> AxisRange {
        self.x_limits
    }

    pub fn x_range(&self) -> AxisRange {
        self.x_range
    }

    /// Set the shared x-range, clamped to the limits and ordered.
    pub fn set_x_range(&mut self, a: f64, b: f64) {
        let lim = self.x_limits;
        self.x_range = AxisRange::new(lim.clamp(a), lim.clamp(b));
    }

    pub fn reset_x_range(&mut self) {
        self.x_range = self.x_limits;
    }

    /// Build one chart per active graph with a non-empty selection.
    pub fn plan(&self, table: &Table, colors: &ChannelColors) -> Result<RenderPlan, ChartError> {
        let mut plan = RenderPlan::default();
        for (slot, graph) in self.graphs().iter().enumerate() {
            if graph.selected.is_empty() {
                plan.warnings.push(GraphWarning::empty_selection(slot));
                continue;
            }
            let chart = LineChart::build(
                table,
                &graph.selected,
                &graph.title,
                &graph.y_axis_label(),
                self.x_range,
                colors,
            )?;
            plan.charts.push((slot, chart));
        }
        Ok(plan)
    }
}
