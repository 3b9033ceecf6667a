mod app;
mod color;
mod config;
mod data;
mod diagnosis;
mod error;
mod session;
mod state;
mod ui;

use app::StudentMonitorApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load();
    log::info!("Student data: {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Monitor Estudiantil UdeC",
        options,
        Box::new(|_cc| Ok(Box::new(StudentMonitorApp::new(config)))),
    )
}
