use eframe::egui::{self, Color32, ScrollArea, Ui};
use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::chart::LineChart;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Chart list (central panel)
// ---------------------------------------------------------------------------

/// Render every configured graph, top to bottom.
pub fn charts_view(ui: &mut Ui, state: &AppState) {
    let session = match &state.session {
        Some(s) => s,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a raw data file and a shaping file  (File → Open…)");
            });
            return;
        }
    };

    let plan = match session.config.plan(&session.processed, &session.colors) {
        Ok(plan) => plan,
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Error: {e}"));
            return;
        }
    };

    if plan.charts.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select columns for a graph in the side panel");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (slot, chart) in &plan.charts {
                line_chart(ui, *slot, chart);
                ui.add_space(12.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Single chart
// ---------------------------------------------------------------------------

fn line_chart(ui: &mut Ui, slot: usize, chart: &LineChart) {
    ui.heading(chart.title.as_str());

    let x = chart.x_range;
    let y = chart.y_range();
    // egui_plot needs a non-zero width
    let (x_min, x_max) = if x.span() > 0.0 {
        (x.min, x.max)
    } else {
        (x.min - 0.5, x.max + 0.5)
    };

    let mut plot = Plot::new(egui::Id::new(("graph", slot)))
        .height(CHART_HEIGHT)
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label.clone())
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false);

    if chart.show_legend {
        plot = plot.legend(Legend::default().position(Corner::RightTop));
    }

    plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y.min], [x_max, y.max]));

        for series in &chart.series {
            let points: PlotPoints = series.points.iter().copied().collect();
            let line = Line::new(points)
                .name(&series.name)
                .color(series.color)
                .width(1.5);
            plot_ui.line(line);
        }
    });
}
