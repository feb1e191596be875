use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::graphs::{GraphWarning, YAxisPreset, MAX_GRAPHS};
use crate::state::AppState;

const WARNING_COLOR: Color32 = Color32::from_rgb(230, 160, 0);

// ---------------------------------------------------------------------------
// Left side panel – graph configuration
// ---------------------------------------------------------------------------

/// Render the left configuration panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Input files");
    ui.separator();
    file_row(ui, "Raw data", state.raw_path.as_deref());
    file_row(ui, "Shaping data", state.shaping_path.as_deref());
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Raw…").clicked() {
            if let Some(path) = pick_csv("Choose the raw data CSV file") {
                state.set_raw_path(path);
            }
        }
        if ui.button("Shaping…").clicked() {
            if let Some(path) = pick_csv("Choose the data shaping CSV file") {
                state.set_shaping_path(path);
            }
        }
    });
    ui.add_space(8.0);

    ui.heading("Customize graphs");
    ui.separator();

    let Some(session) = state.session.as_mut() else {
        ui.label("No data processed.");
        return;
    };
    let config = &mut session.config;

    // Clone what we need so we can mutate the config inside the loop.
    let columns = config.available_columns().to_vec();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Graph count ----
            let mut n = config.num_graphs();
            if ui
                .add(egui::Slider::new(&mut n, 1..=MAX_GRAPHS).text("Number of graphs"))
                .changed()
            {
                config.set_num_graphs(n);
            }

            // ---- Shared x-range ----
            ui.strong("Time range [s]");
            let limits = config.x_limits();
            let range = config.x_range();
            let (mut from, mut to) = (range.min, range.max);
            let from_changed = ui
                .add(egui::Slider::new(&mut from, limits.min..=limits.max).text("from"))
                .changed();
            let to_changed = ui
                .add(egui::Slider::new(&mut to, limits.min..=limits.max).text("to"))
                .changed();
            if from_changed && from > to {
                to = from;
            }
            if to_changed && to < from {
                from = to;
            }
            if from_changed || to_changed {
                config.set_x_range(from, to);
            }
            if ui.small_button("Reset").clicked() {
                config.reset_x_range();
            }
            ui.separator();

            // ---- Per-graph settings (collapsible) ----
            for slot in 0..config.num_graphs() {
                let Some(graph) = config.graph_mut(slot) else {
                    continue;
                };

                egui::CollapsingHeader::new(
                    RichText::new(format!("Graph {} settings", slot + 1)).strong(),
                )
                .id_salt(("graph_settings", slot))
                .default_open(slot == 0)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Columns");
                    for col in &columns {
                        let mut checked = graph.is_selected(col);
                        if ui.checkbox(&mut checked, col.as_str()).changed() {
                            graph.set_selected(col, checked);
                        }
                    }

                    ui.label("Y-axis label");
                    egui::ComboBox::from_id_salt(("y_label", slot))
                        .selected_text(graph.y_axis.label())
                        .show_ui(ui, |ui: &mut Ui| {
                            for preset in YAxisPreset::ALL {
                                ui.selectable_value(&mut graph.y_axis, preset, preset.label());
                            }
                        });
                    if graph.y_axis == YAxisPreset::Custom {
                        ui.label("Custom Y-axis label");
                        ui.text_edit_singleline(&mut graph.custom_label);
                    }

                    ui.label("Title");
                    ui.text_edit_singleline(&mut graph.title);
                });

                if graph.selected.is_empty() {
                    let warning = GraphWarning::empty_selection(slot);
                    ui.colored_label(WARNING_COLOR, warning.message);
                }
            }
        });
}

fn file_row(ui: &mut Ui, label: &str, path: Option<&Path>) {
    let name = path
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "–".to_string());
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(label);
        ui.label(name);
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open raw data…").clicked() {
                if let Some(path) = pick_csv("Choose the raw data CSV file") {
                    state.set_raw_path(path);
                }
                ui.close_menu();
            }
            if ui.button("Open shaping data…").clicked() {
                if let Some(path) = pick_csv("Choose the data shaping CSV file") {
                    state.set_shaping_path(path);
                }
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Reload").clicked() {
                state.submit();
                ui.close_menu();
            }
            if ui.button("Clear").clicked() {
                state.clear();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} rows, {} channels",
                session.processed.len(),
                session.processed.channel_names().len()
            ));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

fn pick_csv(title: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file()
}
