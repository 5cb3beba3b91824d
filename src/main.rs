// EverySo
// Main entry point

use anyhow::{anyhow, Context, Result};
use everyso::services::config::AppConfig;
use everyso::services::database::Database;
use everyso::ui_egui::EverySoApp;

fn main() -> Result<()> {
    let (config, config_error) = AppConfig::load_or_default();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Some(err) = config_error {
        log::warn!("Ignoring config file: {}", err);
    }

    log::info!("Starting EverySo");

    let database = open_database(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EverySo")
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([360.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EverySo",
        options,
        Box::new(move |cc| Ok(Box::new(EverySoApp::new(cc, database)))),
    )
    .map_err(|err| anyhow!("window closed with an error: {err}"))
}

/// Opens the store and leaks it for the 'static lifetime eframe needs.
fn open_database(config: &AppConfig) -> Result<&'static Database> {
    let path = config.resolve_database_path()?;
    let path = path.to_string_lossy();
    log::info!("Using database at {}", path);

    let db = Database::new(&path).context("Failed to open database")?;
    db.initialize_schema()
        .context("Failed to initialize database schema")?;

    Ok(Box::leak(Box::new(db)))
}
