//! Orbit-style camera controller used by the dashboard.

use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::picking::mesh_picking::MeshPickingCamera;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

const ORBIT_SENSITIVITY: f32 = 0.01;
const PAN_SENSITIVITY: f32 = 0.002;
const ZOOM_SENSITIVITY: f32 = 1.2;
const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = FRAC_PI_2 - 0.05;
/// Closest the camera may get to its focus.
pub const MIN_DISTANCE: f32 = 8.0;
/// Farthest the camera may get from its focus.
pub const MAX_DISTANCE: f32 = 60.0;
const INITIAL_CAMERA_POS: Vec3 = Vec3::new(0.0, 14.0, 22.0);

/// Adds orbit camera spawning and control systems.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, control_orbit_camera);
    }
}

#[derive(Component)]
/// Component storing orbit camera parameters.
pub struct OrbitCamera {
    pub focus: Vec3,
    radius: f32,
    yaw: f32,
    pitch: f32,
}

impl OrbitCamera {
    fn new(focus: Vec3, translation: Vec3) -> Self {
        let offset = translation - focus;
        let radius = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let yaw = offset.z.atan2(offset.x);
        let pitch = (offset.y / offset.length()).asin().clamp(MIN_PITCH, MAX_PITCH);

        Self {
            focus,
            radius,
            yaw,
            pitch,
        }
    }

    fn offset(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(
            self.radius * cos_pitch * cos_yaw,
            self.radius * sin_pitch,
            self.radius * cos_pitch * sin_yaw,
        )
    }

    fn zoom(&mut self, scroll: f32) {
        self.radius = (self.radius - scroll * ZOOM_SENSITIVITY).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

/// Spawn the primary viewer camera with an orbit controller.
fn spawn_camera(mut commands: Commands) {
    let focus = Vec3::ZERO;
    let orbit = OrbitCamera::new(focus, INITIAL_CAMERA_POS);
    let translation = focus + orbit.offset();

    commands.spawn((
        Name::new("Viewer Camera"),
        Camera3d::default(),
        MeshPickingCamera,
        Transform::from_translation(translation).looking_at(focus, Vec3::Y),
        orbit,
    ));
}

/// Right drag orbits, middle drag pans the focus, wheel zooms.
///
/// The transform is only written when input moved the camera so change
/// detection reflects real movement.
fn control_orbit_camera(
    mut motion_events: MessageReader<MouseMotion>,
    mut scroll_events: MessageReader<MouseWheel>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut query: Query<(&mut Transform, &mut OrbitCamera)>,
) {
    let mut motion = Vec2::ZERO;
    for ev in motion_events.read() {
        motion += ev.delta;
    }
    let rotation_delta = if mouse_buttons.pressed(MouseButton::Right) {
        motion
    } else {
        Vec2::ZERO
    };
    let pan_delta = if mouse_buttons.pressed(MouseButton::Middle) {
        motion
    } else {
        Vec2::ZERO
    };

    let mut scroll = 0.0;
    for ev in scroll_events.read() {
        scroll += ev.y;
    }

    if rotation_delta == Vec2::ZERO && pan_delta == Vec2::ZERO && scroll.abs() <= f32::EPSILON {
        return;
    }

    for (mut transform, mut orbit) in query.iter_mut() {
        if rotation_delta.length_squared() > 0.0 {
            orbit.yaw += rotation_delta.x * ORBIT_SENSITIVITY;
            orbit.pitch =
                (orbit.pitch + rotation_delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
        }

        if pan_delta.length_squared() > 0.0 {
            let scale = orbit.radius * PAN_SENSITIVITY;
            let right = transform.right() * -pan_delta.x * scale;
            let up = transform.up() * pan_delta.y * scale;
            orbit.focus += right + up;
        }

        if scroll.abs() > f32::EPSILON {
            orbit.zoom(scroll);
        }

        transform.translation = orbit.focus + orbit.offset();
        transform.look_at(orbit.focus, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let mut orbit = OrbitCamera::new(Vec3::ZERO, INITIAL_CAMERA_POS);
        orbit.zoom(1_000.0);
        assert_eq!(orbit.radius, MIN_DISTANCE);
        orbit.zoom(-1_000.0);
        assert_eq!(orbit.radius, MAX_DISTANCE);
    }

    #[test]
    fn offset_matches_radius() {
        let orbit = OrbitCamera::new(Vec3::ZERO, INITIAL_CAMERA_POS);
        assert!((orbit.offset().length() - orbit.radius).abs() < 1e-4);
        assert!((orbit.offset() - INITIAL_CAMERA_POS).length() < 1e-3);
    }
}
