//! Diagnostic samples emitted whenever the viewer camera moves.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Euclidean distance from the world origin.
    pub distance: f32,
}

impl CameraSample {
    pub fn from_position([x, y, z]: [f32; 3]) -> Self {
        Self {
            x,
            y,
            z,
            distance: (x * x + y * y + z * z).sqrt(),
        }
    }
}

impl fmt::Display for CameraSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "camera x={:.2} y={:.2} z={:.2} distance={:.2}",
            self.x, self.y, self.z, self.distance
        )
    }
}
