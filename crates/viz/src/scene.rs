use bevy::math::primitives::Plane3d;
use bevy::prelude::*;

/// Uniform scale applied to every terrain model.
pub const TERRAIN_SCALE: f32 = 2.0;
/// Side length of the flat ground shown when a terrain model fails to load.
pub const FALLBACK_GROUND_WIDTH: f32 = 24.0;

#[derive(Component)]
/// Anything spawned for the selected region; despawned on region change.
pub struct RegionContent;

pub fn spawn_environment(mut commands: Commands) {
    commands.spawn((
        Name::new("Key Light"),
        DirectionalLight {
            illuminance: 4000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("Fill Light"),
        DirectionalLight {
            illuminance: 1200.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-8.0, 6.0, -6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

pub fn spawn_terrain(commands: &mut Commands, region_id: &str, scene: Handle<Scene>) {
    commands.spawn((
        Name::new(format!("Terrain {region_id}")),
        SceneRoot(scene),
        Transform::from_scale(Vec3::splat(TERRAIN_SCALE)),
        RegionContent,
    ));
}

/// Flat stand-in ground so markers stay usable without their terrain.
pub fn spawn_fallback_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    region_id: &str,
) {
    let mesh = meshes.add(Mesh::from(
        Plane3d::default()
            .mesh()
            .size(FALLBACK_GROUND_WIDTH, FALLBACK_GROUND_WIDTH),
    ));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.16, 0.19, 0.22),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });

    commands.spawn((
        Name::new(format!("Fallback Ground {region_id}")),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::from_translation(Vec3::new(0.0, -0.01, 0.0)),
        RegionContent,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_root_is_scaled_region_content() {
        let mut world = World::new();
        spawn_terrain(&mut world.commands(), "m1", Handle::default());
        world.flush();

        let roots: Vec<_> = world
            .query_filtered::<(&Transform, &Name), (With<SceneRoot>, With<RegionContent>)>()
            .iter(&world)
            .map(|(transform, name)| (transform.scale, name.as_str().to_string()))
            .collect();
        assert_eq!(
            roots,
            vec![(Vec3::splat(TERRAIN_SCALE), "Terrain m1".to_string())]
        );
    }
}
