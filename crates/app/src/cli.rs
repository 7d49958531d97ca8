use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sensor_core::synthesize;

use crate::config::DashboardConfig;

/// Interactive 3D terrain dashboard with mocked cloudburst telemetry.
#[derive(Debug, Parser)]
#[command(name = "cloudburst-dashboard", version)]
pub struct DashboardCliArgs {
    /// Region shown at startup (defaults to the first region in the table).
    #[arg(long, env = "DASHBOARD_REGION", value_name = "ID")]
    pub region: Option<String>,
    /// Seed for sensor draws; omit for fresh values every run.
    #[arg(long, env = "DASHBOARD_SEED", value_name = "N")]
    pub seed: Option<u64>,
    /// JSON region table replacing the built-in regions.
    #[arg(long = "regions", env = "DASHBOARD_REGIONS_FILE", value_name = "PATH")]
    pub regions_file: Option<PathBuf>,
    /// Directory terrain assets are resolved against.
    #[arg(long, env = "DASHBOARD_ASSET_ROOT", value_name = "DIR", default_value = "assets")]
    pub asset_root: String,
    /// Window width in pixels.
    #[arg(long, value_name = "PX", default_value_t = 1440)]
    pub width: u32,
    /// Window height in pixels.
    #[arg(long, value_name = "PX", default_value_t = 900)]
    pub height: u32,
    /// Tracing filter directive, overrides RUST_LOG.
    #[arg(long = "log-filter", value_name = "FILTER")]
    pub log_filter: Option<String>,
    /// Print the initial region's synthesized sensors as JSON and exit.
    #[arg(long = "dump-sensors", action = clap::ArgAction::SetTrue)]
    pub dump_sensors: bool,
}

/// Run one-shot commands. Returns `true` when the viewer should not start.
pub fn handle_commands(config: &DashboardConfig) -> Result<bool> {
    if !config.dump_sensors {
        return Ok(false);
    }

    let region = config.registry.get(&config.initial_region)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let sensors = synthesize(&region.anchors, region.numeric_id, &mut rng);
    let json = serde_json::to_string_pretty(&sensors).context("failed to encode sensors")?;
    println!("{json}");
    Ok(true)
}
