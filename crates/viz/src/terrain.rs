//! Asynchronous terrain loading for the selected region.
//!
//! A load starts whenever the selection generation moves. Until the model
//! resolves nothing region-specific is spawned and the UI shows a loading
//! placeholder. Completions from superseded generations are discarded.

use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use sensor_core::{LoadOutcome, LoadPhase, LoadTracker};

use crate::markers::spawn_markers;
use crate::scene::{RegionContent, spawn_fallback_ground, spawn_terrain};
use crate::{Regions, Selection};

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerrainLoad>()
            .add_systems(Update, (begin_terrain_load, poll_terrain_load).chain());
    }
}

#[derive(Resource, Default)]
pub struct TerrainLoad {
    pub tracker: LoadTracker,
    handle: Option<Handle<Scene>>,
}

impl TerrainLoad {
    pub fn phase(&self) -> LoadPhase {
        self.tracker.phase()
    }
}

/// Tear down the previous region and request the selected region's model.
fn begin_terrain_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    regions: Res<Regions>,
    selection: Res<Selection>,
    mut load: ResMut<TerrainLoad>,
    content: Query<Entity, With<RegionContent>>,
) {
    let generation = selection.0.generation();
    if !load.tracker.needs_load(generation) {
        return;
    }

    for entity in &content {
        commands.entity(entity).despawn();
    }

    let region = match regions.0.get(selection.0.region_id()) {
        Ok(region) => region,
        Err(err) => {
            warn!("cannot load terrain: {err}");
            return;
        }
    };

    if let Some(abandoned) = load.tracker.begin(generation) {
        debug!("abandoning terrain load for generation {abandoned}");
    }
    // Dropping the previous handle lets the asset server discard a load nobody waits on.
    load.handle = Some(
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(region.terrain_asset_path.clone())),
    );
    info!(
        "loading terrain {} for region {}",
        region.terrain_asset_path, region.id
    );
}

/// Spawn terrain and markers once the pending model resolves.
fn poll_terrain_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    selection: Res<Selection>,
    mut load: ResMut<TerrainLoad>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !load.tracker.is_pending() {
        return;
    }
    let Some(handle) = load.handle.clone() else {
        return;
    };

    let region_id = selection.0.region_id();
    let outcome = match asset_server.get_load_states(handle.id()) {
        Some((LoadState::Failed(err), _, _)) => {
            warn!("terrain for region {region_id} failed to load: {err}");
            LoadOutcome::Failed
        }
        Some((_, _, RecursiveDependencyLoadState::Failed(err))) => {
            warn!("terrain dependency for region {region_id} failed to load: {err}");
            LoadOutcome::Failed
        }
        Some((LoadState::Loaded, _, RecursiveDependencyLoadState::Loaded)) => LoadOutcome::Loaded,
        _ => return,
    };

    let generation = selection.0.generation();
    if !load.tracker.resolve(generation, outcome) {
        return;
    }

    match outcome {
        LoadOutcome::Loaded => spawn_terrain(&mut commands, region_id, handle),
        LoadOutcome::Failed => {
            load.handle = None;
            spawn_fallback_ground(&mut commands, &mut meshes, &mut materials, region_id);
        }
    }
    spawn_markers(
        &mut commands,
        &mut meshes,
        &mut materials,
        selection.0.sensors(),
    );
    debug!(
        "region {} ready with {} markers",
        region_id,
        selection.0.sensors().len()
    );
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use bevy::asset::AssetPlugin;
    use bevy::ecs::query::QueryFilter;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sensor_core::{RegionRegistry, SelectionState};

    use super::*;
    use crate::markers::{MarkerRing, SensorMarker, SensorMarkerPlugin};
    use crate::SensorRng;

    /// Headless app with the terrain and marker systems for `region_id`.
    pub(crate) fn composer_app(region_id: &str) -> App {
        let registry = RegionRegistry::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        let selection = SelectionState::new(&registry, region_id, &mut rng).unwrap();

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_asset::<Scene>()
            .insert_resource(Regions(registry))
            .insert_resource(Selection(selection))
            .insert_resource(SensorRng(rng))
            .add_plugins((TerrainPlugin, SensorMarkerPlugin));
        app
    }

    /// Update until the pending terrain load resolves. No terrain is shipped, so it fails.
    pub(crate) fn settle(app: &mut App) {
        for _ in 0..1_000 {
            app.update();
            if !app.world().resource::<TerrainLoad>().tracker.is_pending() {
                return;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        panic!("terrain load never resolved");
    }

    pub(crate) fn count<F: QueryFilter>(app: &mut App) -> usize {
        let mut query = app.world_mut().query_filtered::<Entity, F>();
        query.iter(app.world()).count()
    }

    fn select_region(app: &mut App, region_id: &str) {
        let registry = app.world().resource::<Regions>().0.clone();
        app.world_mut()
            .resource_scope(|world, mut rng: Mut<SensorRng>| {
                world
                    .resource_mut::<Selection>()
                    .0
                    .select_region(&registry, region_id, &mut rng.0)
            })
            .unwrap();
    }

    #[test]
    fn nothing_region_specific_while_pending() {
        let mut app = composer_app("m1");
        app.update();

        assert_eq!(app.world().resource::<TerrainLoad>().phase(), LoadPhase::Pending);
        assert_eq!(count::<With<SensorMarker>>(&mut app), 0);
        assert_eq!(count::<With<RegionContent>>(&mut app), 0);
    }

    #[test]
    fn failed_load_falls_back_to_ground_with_markers() {
        let mut app = composer_app("m1");
        settle(&mut app);

        assert_eq!(app.world().resource::<TerrainLoad>().phase(), LoadPhase::Failed);
        assert_eq!(count::<With<SensorMarker>>(&mut app), 7);
        assert_eq!(count::<With<MarkerRing>>(&mut app), 7);
        assert_eq!(
            count::<(With<RegionContent>, Without<SensorMarker>)>(&mut app),
            1
        );
        assert_eq!(count::<With<SceneRoot>>(&mut app), 0);

        let mut ids: Vec<u32> = app
            .world_mut()
            .query::<&SensorMarker>()
            .iter(app.world())
            .map(|marker| marker.sensor.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (100..=106).collect::<Vec<_>>());
    }

    #[test]
    fn region_change_rebuilds_content() {
        let mut app = composer_app("m1");
        settle(&mut app);
        assert_eq!(count::<With<SensorMarker>>(&mut app), 7);

        select_region(&mut app, "m2");
        app.update();
        assert_eq!(count::<With<RegionContent>>(&mut app), 0);
        assert_eq!(count::<With<MarkerRing>>(&mut app), 0);
        assert!(app.world().resource::<TerrainLoad>().tracker.is_pending());

        settle(&mut app);
        assert_eq!(count::<With<SensorMarker>>(&mut app), 4);
        assert_eq!(count::<With<MarkerRing>>(&mut app), 4);
        assert_eq!(
            count::<(With<RegionContent>, Without<SensorMarker>)>(&mut app),
            1
        );

        let selection = &app.world().resource::<Selection>().0;
        let expected: Vec<_> = selection.sensors().to_vec();
        let mut spawned: Vec<_> = app
            .world_mut()
            .query::<&SensorMarker>()
            .iter(app.world())
            .map(|marker| marker.sensor.clone())
            .collect();
        spawned.sort_by_key(|sensor| sensor.id);
        assert_eq!(spawned, expected);
    }
}
