mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::BenchViewApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let path = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            eprintln!("Usage: benchview <benchmark-log>");
            std::process::exit(2);
        }
    };

    let report = match data::parse::load_file(&path) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "BenchView – Compression Benchmark Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(BenchViewApp::with_report(report)))),
    )
}
