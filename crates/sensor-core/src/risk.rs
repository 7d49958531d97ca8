//! Cloudburst risk classification and the palette every view derives from.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// First draw must exceed this to classify as [`Risk::High`].
pub const HIGH_THRESHOLD: f64 = 0.7;
/// Second, independent draw must exceed this to classify as [`Risk::Medium`].
pub const MEDIUM_THRESHOLD: f64 = 0.4;

/// Emissive intensity of a marker that is neither hovered nor active.
pub const BASE_EMISSIVE: f32 = 2.0;
/// Emissive intensity while the pointer is over a marker.
pub const HOVER_EMISSIVE: f32 = 3.0;
/// Emissive intensity of the marker backing the active sensor.
pub const ACTIVE_EMISSIVE: f32 = 5.0;
/// Opacity of the ring drawn around hovered or active markers.
pub const RING_ALPHA: f32 = 0.35;
/// Marker sphere radius in world units.
pub const MARKER_RADIUS: f32 = 0.3;
/// Scale applied to a marker while hovered.
pub const HOVER_SCALE: f32 = 1.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Categorical cloudburst risk attached to every sensor.
pub enum Risk {
    Low,
    Medium,
    High,
}

impl Risk {
    pub const ALL: [Risk; 3] = [Risk::Low, Risk::Medium, Risk::High];

    /// Classify from two independent uniform draws in `[0, 1)`.
    ///
    /// `secondary` is only consulted when `primary` does not reach the high
    /// threshold, which yields P(high)=0.3, P(medium)=0.42, P(low)=0.28.
    pub fn classify(primary: f64, secondary: f64) -> Self {
        if primary > HIGH_THRESHOLD {
            Risk::High
        } else if secondary > MEDIUM_THRESHOLD {
            Risk::Medium
        } else {
            Risk::Low
        }
    }

    /// Draw a classification from `rng`, consuming the second value only when needed.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let primary: f64 = rng.random();
        let secondary = if primary > HIGH_THRESHOLD {
            0.0
        } else {
            rng.random()
        };
        Risk::classify(primary, secondary)
    }

    pub fn label(self) -> &'static str {
        match self {
            Risk::Low => "LOW",
            Risk::Medium => "MEDIUM",
            Risk::High => "HIGH",
        }
    }

    /// Palette entry for this level.
    pub fn style(self) -> &'static RiskStyle {
        &PALETTE[self as usize]
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// sRGB color channels in `[0, 1]`.
pub struct Rgb(pub f32, pub f32, pub f32);

#[derive(Debug)]
/// Colors used for a risk level in the scene and in the detail panel.
pub struct RiskStyle {
    pub name: &'static str,
    pub color: Rgb,
    /// Darker tone behind badge text.
    pub badge_fill: Rgb,
}

/// Indexed by `Risk as usize`.
static PALETTE: [RiskStyle; 3] = [
    RiskStyle {
        name: "green",
        color: Rgb(0.13, 0.77, 0.37),
        badge_fill: Rgb(0.05, 0.30, 0.15),
    },
    RiskStyle {
        name: "amber",
        color: Rgb(0.96, 0.62, 0.04),
        badge_fill: Rgb(0.40, 0.25, 0.02),
    },
    RiskStyle {
        name: "red",
        color: Rgb(0.94, 0.27, 0.27),
        badge_fill: Rgb(0.42, 0.08, 0.08),
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
/// Resolved look of a single marker for the current pointer state.
pub struct MarkerAppearance {
    pub color: Rgb,
    pub emissive_intensity: f32,
    pub scale: f32,
    pub ring_visible: bool,
    pub ring_alpha: f32,
}

impl MarkerAppearance {
    pub fn resolve(risk: Risk, hovered: bool, active: bool) -> Self {
        let emissive_intensity = if active {
            ACTIVE_EMISSIVE
        } else if hovered {
            HOVER_EMISSIVE
        } else {
            BASE_EMISSIVE
        };
        Self {
            color: risk.style().color,
            emissive_intensity,
            scale: if hovered { HOVER_SCALE } else { 1.0 },
            ring_visible: hovered || active,
            ring_alpha: RING_ALPHA,
        }
    }
}
