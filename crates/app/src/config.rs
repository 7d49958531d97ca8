//! Translation of CLI arguments and environment into a validated `DashboardConfig`.

use anyhow::{Context, Result, bail};
use sensor_core::RegionRegistry;
use viz::ViewerOptions;

use crate::cli::DashboardCliArgs;

#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub registry: RegionRegistry,
    pub initial_region: String,
    pub seed: Option<u64>,
    pub asset_root: String,
    pub window_width: u32,
    pub window_height: u32,
    pub dump_sensors: bool,
}

impl TryFrom<DashboardCliArgs> for DashboardConfig {
    type Error = anyhow::Error;

    fn try_from(args: DashboardCliArgs) -> Result<Self> {
        let registry = match &args.regions_file {
            Some(path) => RegionRegistry::from_path(path)
                .with_context(|| format!("loading region table {}", path.display()))?,
            None => RegionRegistry::builtin(),
        };

        let initial_region = match args.region {
            Some(id) if registry.contains(&id) => id,
            Some(id) => {
                let known: Vec<_> = registry.regions().map(|r| r.id.as_str()).collect();
                bail!("Unknown region {id:?}. Known regions: {}", known.join(", "));
            }
            None => registry.default_region().id.clone(),
        };

        if args.width == 0 || args.height == 0 {
            bail!("Window width and height must be positive integers");
        }

        Ok(Self {
            registry,
            initial_region,
            seed: args.seed,
            asset_root: args.asset_root,
            window_width: args.width,
            window_height: args.height,
            dump_sensors: args.dump_sensors,
        })
    }
}

impl DashboardConfig {
    pub fn viewer_options(&self) -> ViewerOptions {
        ViewerOptions {
            registry: self.registry.clone(),
            initial_region: self.initial_region.clone(),
            seed: self.seed,
            asset_root: self.asset_root.clone(),
            window_width: self.window_width,
            window_height: self.window_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Result<DashboardConfig> {
        let args = DashboardCliArgs::try_parse_from(
            std::iter::once("cloudburst-dashboard").chain(args.iter().copied()),
        )?;
        DashboardConfig::try_from(args)
    }

    #[test]
    fn defaults_to_first_builtin_region() {
        let config = parse(&["--asset-root", "assets"]).unwrap();
        assert_eq!(config.initial_region, "m1");
        assert_eq!((config.window_width, config.window_height), (1440, 900));
        assert!(!config.dump_sensors);
    }

    #[test]
    fn explicit_region_and_seed() {
        let config = parse(&["--region", "m2", "--seed", "42"]).unwrap();
        assert_eq!(config.initial_region, "m2");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.viewer_options().initial_region, "m2");
    }

    #[test]
    fn unknown_region_is_rejected() {
        let err = parse(&["--region", "m7"]).unwrap_err();
        assert!(err.to_string().contains("m7"));
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        assert!(parse(&["--width", "0"]).is_err());
    }

    #[test]
    fn region_file_replaces_builtin_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"regions": [{{"id": "r9", "numeric_id": 9, "display_name": "Test",
                "terrain_asset_path": "terrain/r9.glb", "anchors": []}}]}}"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["--regions", path]).unwrap();
        assert_eq!(config.initial_region, "r9");
        assert!(!config.registry.contains("m1"));
    }
}
