use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::data::select::visible_groups;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Throughput vs. ratio plot (central panel)
// ---------------------------------------------------------------------------

/// Render the comparison chart: one series per visible thread group,
/// compression ratio on x, throughput on y.
pub fn throughput_plot(ui: &mut Ui, state: &AppState) {
    let report = match &state.report {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a benchmark log to compare runs  (File → Open…)");
            });
            return;
        }
    };

    let y_label = if state.relative_throughput {
        "Throughput (relative to group max)"
    } else {
        "Throughput (MB/s)"
    };

    Plot::new("throughput_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Compression ratio")
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for idx in visible_groups(report, &state.selection) {
                let Some((key, points)) = report.groups.get(idx) else {
                    continue;
                };

                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(key))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let name = format!("threads={key}");

                let rates: Vec<f64> = if state.relative_throughput {
                    let max = points
                        .iter()
                        .map(|p| p.datarate)
                        .fold(f64::NEG_INFINITY, f64::max);
                    if max.abs() < f64::EPSILON {
                        vec![0.0; points.len()]
                    } else {
                        points.iter().map(|p| p.datarate / max).collect()
                    }
                } else {
                    points.iter().map(|p| p.datarate).collect()
                };

                let coords: Vec<[f64; 2]> = points
                    .iter()
                    .zip(rates.iter())
                    .map(|(p, &rate)| [p.ratio, rate])
                    .collect();

                let line = Line::new(PlotPoints::from(coords.clone()))
                    .name(&name)
                    .color(color)
                    .width(1.5);
                plot_ui.line(line);

                // Markers make the individual level sweeps readable.
                let markers = Points::new(PlotPoints::from(coords))
                    .name(&name)
                    .color(color)
                    .radius(3.0);
                plot_ui.points(markers);
            }
        });
}
