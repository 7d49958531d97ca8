//! Logs the viewer camera position every time it moves.

use bevy::prelude::*;
use sensor_core::CameraSample;

use crate::orbit_camera::OrbitCamera;

pub struct CameraObserverPlugin;

impl Plugin for CameraObserverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, log_camera_movement);
    }
}

fn log_camera_movement(cameras: Query<&Transform, (With<OrbitCamera>, Changed<Transform>)>) {
    for transform in &cameras {
        let sample = CameraSample::from_position(transform.translation.to_array());
        info!(
            target: "camera",
            x = sample.x,
            y = sample.y,
            z = sample.z,
            distance = sample.distance,
            "{sample}"
        );
    }
}
