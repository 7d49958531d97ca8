//! Mocked telemetry for region anchors.

use std::fmt;
use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::registry::Anchor;
use crate::risk::Risk;

pub const TEMPERATURE_RANGE: Range<f64> = 5.0..20.0;
pub const HUMIDITY_RANGE: Range<f64> = 60.0..90.0;
pub const WIND_SPEED_RANGE: Range<f64> = 10.0..40.0;
pub const AIR_MOISTURE_RANGE: Range<f64> = 7.0..12.0;

/// Region numeric ids are multiplied by this to form sensor id blocks.
pub const SENSOR_ID_STRIDE: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Celsius,
    Percent,
    KilometresPerHour,
    GramsPerCubicMetre,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Percent => "%",
            Unit::KilometresPerHour => " km/h",
            Unit::GramsPerCubicMetre => " g/m³",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
/// A single metric value; displays with one decimal and its unit.
pub struct Reading {
    pub value: f64,
    pub unit: Unit,
}

impl Reading {
    fn draw<R: Rng + ?Sized>(rng: &mut R, range: Range<f64>, unit: Unit) -> Self {
        Self {
            value: rng.random_range(range),
            unit,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}{}", self.value, self.unit.suffix())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Synthesized telemetry record attached to one anchor.
pub struct Sensor {
    pub id: u32,
    pub label: String,
    pub position: [f32; 3],
    pub temperature: Reading,
    pub humidity: Reading,
    pub wind_speed: Reading,
    pub air_moisture: Reading,
    pub risk: Risk,
}

pub fn sensor_id(region_numeric_id: u32, anchor_index: usize) -> u32 {
    region_numeric_id * SENSOR_ID_STRIDE + anchor_index as u32
}

/// Produce one sensor per anchor, in anchor order.
///
/// Every field is an independent uniform draw from `rng`, so two calls with an
/// unseeded source never agree.
pub fn synthesize<R: Rng + ?Sized>(
    anchors: &[Anchor],
    region_numeric_id: u32,
    rng: &mut R,
) -> Vec<Sensor> {
    anchors
        .iter()
        .enumerate()
        .map(|(idx, anchor)| Sensor {
            id: sensor_id(region_numeric_id, idx),
            label: anchor.label.clone(),
            position: anchor.position,
            temperature: Reading::draw(rng, TEMPERATURE_RANGE, Unit::Celsius),
            humidity: Reading::draw(rng, HUMIDITY_RANGE, Unit::Percent),
            wind_speed: Reading::draw(rng, WIND_SPEED_RANGE, Unit::KilometresPerHour),
            air_moisture: Reading::draw(rng, AIR_MOISTURE_RANGE, Unit::GramsPerCubicMetre),
            risk: Risk::draw(rng),
        })
        .collect()
}
