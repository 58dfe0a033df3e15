mod app;
mod convert;
mod messages;
mod panels;
mod state;
mod worker;

use std::path::Path;

use neurolabel_core::config::LabelerConfig;

/// Config picked up from the working directory when present.
const CONFIG_FILE: &str = "neurolabel.toml";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config(Path::new(CONFIG_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("NeuroLabel"),
        ..Default::default()
    };

    eframe::run_native(
        "NeuroLabel",
        options,
        Box::new(|cc| Ok(Box::new(app::LabelerApp::new(&cc.egui_ctx, config)?))),
    )
}

fn load_config(path: &Path) -> LabelerConfig {
    if !path.exists() {
        return LabelerConfig::default();
    }
    match LabelerConfig::load(path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "Loaded config");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
            LabelerConfig::default()
        }
    }
}
