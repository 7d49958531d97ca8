mod cli;
mod config;
mod telemetry;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use viz::AppExit;

use crate::cli::DashboardCliArgs;
use crate::config::DashboardConfig;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = DashboardCliArgs::parse();
    telemetry::init_tracing(args.log_filter.as_deref())?;

    let config = DashboardConfig::try_from(args)?;
    if cli::handle_commands(&config)? {
        return Ok(());
    }

    info!(
        "starting dashboard on region {} ({} regions available)",
        config.initial_region,
        config.registry.regions().count()
    );
    match viz::run(&config.viewer_options()).context("failed to start viewer")? {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => bail!("viewer exited with status {code}"),
    }
}
