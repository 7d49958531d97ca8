//! Tracing subscriber setup for the dashboard process.

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Used when neither `--log-filter` nor `RUST_LOG` is set. Keeps renderer noise down.
const DEFAULT_FILTER: &str = "info,wgpu=error,naga=warn";

/// Install the global fmt subscriber. Bevy's own log plugin is disabled so this is the only one.
pub fn init_tracing(filter: Option<&str>) -> Result<()> {
    let env_filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid log filter {directives:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
