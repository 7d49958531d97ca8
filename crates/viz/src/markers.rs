//! Clickable sensor markers placed on the terrain.

use bevy::math::primitives::{Sphere, Torus};
use bevy::picking::Pickable;
use bevy::picking::events::{Click, Out, Over, Pointer};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;
use sensor_core::risk::{MARKER_RADIUS, MarkerAppearance};
use sensor_core::{Rgb, Sensor};

use crate::Selection;
use crate::scene::RegionContent;

const RING_INNER_RADIUS: f32 = MARKER_RADIUS * 1.5;
const RING_OUTER_RADIUS: f32 = MARKER_RADIUS * 1.9;

pub struct SensorMarkerPlugin;

impl Plugin for SensorMarkerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_marker_appearance);
    }
}

#[derive(Component)]
/// Sphere representing one sensor of the selected region.
pub struct SensorMarker {
    pub sensor: Sensor,
    pub hovered: bool,
    pub(crate) ring: Entity,
    applied: Option<MarkerAppearance>,
}

#[derive(Component)]
/// Highlight ring shown around a hovered or active marker.
pub struct MarkerRing;

pub(crate) fn srgb(rgb: Rgb) -> Color {
    Color::srgb(rgb.0, rgb.1, rgb.2)
}

/// One marker per sensor, each with its own material so highlights stay independent.
pub fn spawn_markers(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    sensors: &[Sensor],
) {
    let sphere = meshes.add(Sphere::new(MARKER_RADIUS).mesh().uv(32, 18));
    let ring_mesh = meshes.add(Torus::new(RING_INNER_RADIUS, RING_OUTER_RADIUS));

    for sensor in sensors {
        let appearance = MarkerAppearance::resolve(sensor.risk, false, false);
        let color = srgb(appearance.color);
        let material = materials.add(StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * appearance.emissive_intensity,
            ..default()
        });
        let ring_material = materials.add(StandardMaterial {
            base_color: color.with_alpha(appearance.ring_alpha),
            emissive: color.to_linear(),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            cull_mode: None,
            ..default()
        });

        let ring = commands
            .spawn((
                Name::new("Marker Ring"),
                MarkerRing,
                Mesh3d(ring_mesh.clone()),
                MeshMaterial3d(ring_material),
                Transform::default(),
                Visibility::Hidden,
                Pickable::IGNORE,
            ))
            .id();

        commands
            .spawn((
                Name::new(format!("Sensor {} {}", sensor.id, sensor.label)),
                SensorMarker {
                    sensor: sensor.clone(),
                    hovered: false,
                    ring,
                    applied: Some(appearance),
                },
                Mesh3d(sphere.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(Vec3::from_array(sensor.position)),
                Pickable::default(),
                RegionContent,
            ))
            .add_child(ring)
            .observe(on_marker_over)
            .observe(on_marker_out)
            .observe(on_marker_click);
    }
}

fn on_marker_over(over: On<Pointer<Over>>, mut markers: Query<&mut SensorMarker>) {
    if let Ok(mut marker) = markers.get_mut(over.entity) {
        marker.hovered = true;
    }
}

fn on_marker_out(out: On<Pointer<Out>>, mut markers: Query<&mut SensorMarker>) {
    if let Ok(mut marker) = markers.get_mut(out.entity) {
        marker.hovered = false;
    }
}

fn on_marker_click(
    click: On<Pointer<Click>>,
    markers: Query<&SensorMarker>,
    mut selection: ResMut<Selection>,
) {
    if click.event.button != PointerButton::Primary {
        return;
    }
    let Ok(marker) = markers.get(click.entity) else {
        return;
    };
    if selection.0.select_sensor(&marker.sensor) {
        info!(
            "opened sensor {} ({}) risk={}",
            marker.sensor.id, marker.sensor.label, marker.sensor.risk
        );
    }
}

/// Push hover and selection state into marker materials, scale and ring visibility.
fn apply_marker_appearance(
    selection: Res<Selection>,
    mut markers: Query<(
        &mut SensorMarker,
        &MeshMaterial3d<StandardMaterial>,
        &mut Transform,
    )>,
    mut rings: Query<&mut Visibility, With<MarkerRing>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (mut marker, material, mut transform) in markers.iter_mut() {
        let active = selection.0.active_sensor() == Some(&marker.sensor);
        let appearance = MarkerAppearance::resolve(marker.sensor.risk, marker.hovered, active);
        if marker.applied == Some(appearance) {
            continue;
        }

        if let Some(material) = materials.get_mut(&material.0) {
            let color = srgb(appearance.color);
            material.base_color = color;
            material.emissive = color.to_linear() * appearance.emissive_intensity;
        }
        transform.scale = Vec3::splat(appearance.scale);
        if let Ok(mut visibility) = rings.get_mut(marker.ring) {
            *visibility = if appearance.ring_visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
        marker.applied = Some(appearance);
    }
}
