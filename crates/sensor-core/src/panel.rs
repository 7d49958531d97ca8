//! View model for the sensor detail panel.

use std::ops::Range;

use rand::Rng;

use crate::risk::{Risk, RiskStyle};
use crate::synth::Sensor;

pub const TREND_BAR_COUNT: usize = 12;
/// Bar heights as a percentage of the strip height.
pub const TREND_BAR_RANGE: Range<f32> = 30.0..90.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricIcon {
    Thermometer,
    Droplet,
    Cloud,
    Wind,
}

impl MetricIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            MetricIcon::Thermometer => "🌡",
            MetricIcon::Droplet => "💧",
            MetricIcon::Cloud => "☁",
            MetricIcon::Wind => "💨",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricRow {
    pub icon: MetricIcon,
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug)]
/// Everything the panel draws for the active sensor.
pub struct DetailView {
    pub title: String,
    pub sensor_id: u32,
    pub rows: [MetricRow; 4],
    pub risk: Risk,
    /// Decorative only; redrawn on every build.
    pub trend: [f32; TREND_BAR_COUNT],
}

impl DetailView {
    pub fn build<R: Rng + ?Sized>(sensor: &Sensor, rng: &mut R) -> Self {
        let rows = [
            MetricRow {
                icon: MetricIcon::Thermometer,
                label: "Temperature",
                value: sensor.temperature.to_string(),
            },
            MetricRow {
                icon: MetricIcon::Droplet,
                label: "Humidity",
                value: sensor.humidity.to_string(),
            },
            MetricRow {
                icon: MetricIcon::Cloud,
                label: "Air Moisture",
                value: sensor.air_moisture.to_string(),
            },
            MetricRow {
                icon: MetricIcon::Wind,
                label: "Wind Speed",
                value: sensor.wind_speed.to_string(),
            },
        ];

        Self {
            title: sensor.label.clone(),
            sensor_id: sensor.id,
            rows,
            risk: sensor.risk,
            trend: std::array::from_fn(|_| rng.random_range(TREND_BAR_RANGE)),
        }
    }

    pub fn risk_style(&self) -> &'static RiskStyle {
        self.risk.style()
    }

    pub fn badge_text(&self) -> String {
        format!("{} RISK", self.risk.label())
    }
}
