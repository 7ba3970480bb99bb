use eframe::egui;

use crate::data::model::BenchReport;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct BenchViewApp {
    pub state: AppState,
}

impl BenchViewApp {
    /// Start with a report already parsed from the command-line argument.
    pub fn with_report(report: BenchReport) -> Self {
        let mut state = AppState::default();
        state.set_report(report);
        Self { state }
    }
}

impl eframe::App for BenchViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: thread groups ----
        egui::SidePanel::left("group_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::throughput_plot(ui, &self.state);
        });
    }
}
