use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::ScalarValue;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – thread-group visibility
// ---------------------------------------------------------------------------

/// Render the left panel with one checkbox per thread group.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Thread groups");
    ui.separator();

    let report = match &state.report {
        Some(r) => r,
        None => {
            ui.label("No benchmark log loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the loop.
    let groups: Vec<(ScalarValue, usize)> = report
        .groups
        .iter()
        .map(|(key, points)| (key.clone(), points.len()))
        .collect();

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });
    ui.add_space(4.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (key, n_points) in &groups {
                let is_selected = state.selection.contains(key);
                let label = format!("threads={key}  ({n_points} scans)");

                let mut text = RichText::new(&label);
                if let Some(cm) = &state.color_map {
                    text = text.color(cm.color_for(key));
                }

                let mut checked = is_selected;
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_group(key);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(report) = &state.report {
            ui.label(report.summary());
        }

        ui.separator();

        if ui
            .selectable_label(state.relative_throughput, "Relative throughput")
            .clicked()
        {
            state.relative_throughput = !state.relative_throughput;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open benchmark log")
        .add_filter("Benchmark logs", &["log", "txt"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::parse::load_file(&path) {
            Ok(report) => {
                log::info!(
                    "Loaded {} scans in {} thread groups from {}",
                    report.groups.point_count(),
                    report.groups.len(),
                    path.display()
                );
                state.set_report(report);
            }
            Err(e) => {
                log::error!("Failed to load log: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
