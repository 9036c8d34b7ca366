mod app;
mod chart;
mod color;
mod config;
mod data;
mod events;
mod layout;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};

use app::LaunchDashApp;
use config::DashboardConfig;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // The dashboard has nothing to show without its table.
    let table = match data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))
    {
        Ok(table) => table,
        Err(e) => {
            log::error!("Failed to load launch table: {e:#}");
            return Err(e);
        }
    };
    log::info!(
        "Loaded {} launches from {} sites, payload {}..={} kg",
        table.len(),
        table.sites().len(),
        table.payload_bounds().low,
        table.payload_bounds().high
    );

    eframe::run_native(
        &config.window_title,
        config.native_options(),
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(table)))),
    )
    .map_err(|e| anyhow!("eframe: {e}"))
}
