mod app;
mod config;
mod error;
mod upload;
mod utils;

use app::FileDropUploader;
use config::AppConfig;
use eframe::egui;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        error!("{}; falling back to default settings", e);
        AppConfig::default()
    });
    info!("Starting in {:?} mode", config.mode);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([420.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "File Uploader",
        options,
        Box::new(move |cc| Box::new(FileDropUploader::new(cc, config))),
    )
}
