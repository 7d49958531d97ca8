use bevy::asset::AssetPlugin;
use bevy::log::LogPlugin;
use bevy::picking::mesh_picking::{MeshPickingPlugin, MeshPickingSettings};
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin, WindowResolution};
use bevy_egui::EguiPlugin;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sensor_core::{RegionRegistry, RegistryError, SelectionState};

mod camera_observer;
mod markers;
mod orbit_camera;
mod scene;
mod terrain;
mod ui;

pub use bevy::app::AppExit;
pub use camera_observer::CameraObserverPlugin;
pub use orbit_camera::OrbitCameraPlugin;

#[derive(Clone, Debug)]
/// Startup options for the dashboard window.
pub struct ViewerOptions {
    pub registry: RegionRegistry,
    pub initial_region: String,
    /// Seed for sensor and trend draws; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub asset_root: String,
    pub window_width: u32,
    pub window_height: u32,
}

#[derive(Resource)]
/// Region table shared by the picker and the scene composer.
pub struct Regions(pub RegionRegistry);

#[derive(Resource)]
/// Selected region, current sensors and the opened sensor.
pub struct Selection(pub SelectionState);

#[derive(Resource)]
/// Random source for sensor synthesis and decorative trend bars.
pub struct SensorRng(pub StdRng);

/// Region picker, terrain, markers, detail panel and camera diagnostics.
pub struct DashboardPlugin {
    registry: RegionRegistry,
    selection: SelectionState,
    rng: StdRng,
}

impl DashboardPlugin {
    /// Resolve the initial region and draw its first set of sensors.
    pub fn new(options: &ViewerOptions) -> Result<Self, RegistryError> {
        let mut rng = sensor_rng(options.seed);
        let selection = SelectionState::new(&options.registry, &options.initial_region, &mut rng)?;
        Ok(Self {
            registry: options.registry.clone(),
            selection,
            rng,
        })
    }
}

impl Plugin for DashboardPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Regions(self.registry.clone()))
            .insert_resource(Selection(self.selection.clone()))
            .insert_resource(SensorRng(self.rng.clone()))
            .insert_resource(MeshPickingSettings {
                require_markers: true,
                ..default()
            })
            .add_plugins(MeshPickingPlugin)
            .add_plugins(EguiPlugin::default())
            .add_plugins(OrbitCameraPlugin)
            .add_plugins(CameraObserverPlugin)
            .add_plugins(terrain::TerrainPlugin)
            .add_plugins(markers::SensorMarkerPlugin)
            .add_plugins(ui::DashboardUiPlugin)
            .add_systems(Startup, scene::spawn_environment);
    }
}

fn sensor_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Build the windowed app. Logging is left to the caller's tracing subscriber.
pub fn build_app(options: &ViewerOptions) -> Result<App, RegistryError> {
    let dashboard = DashboardPlugin::new(options)?;

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(0.02, 0.03, 0.06)))
        .insert_resource(AmbientLight {
            color: Color::srgb(0.75, 0.8, 0.9),
            brightness: 400.0,
            affects_lightmapped_meshes: true,
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Cloudburst Terrain Dashboard".into(),
                        resolution: WindowResolution::new(
                            options.window_width,
                            options.window_height,
                        ),
                        present_mode: PresentMode::AutoVsync,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: options.asset_root.clone(),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_plugins(dashboard);
    Ok(app)
}

/// Launches the dashboard window and blocks until it closes.
pub fn run(options: &ViewerOptions) -> Result<AppExit, RegistryError> {
    Ok(build_app(options)?.run())
}
