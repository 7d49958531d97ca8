//! Selected region, its live sensor list, and the sensor opened in the detail panel.

use rand::Rng;
use tracing::debug;

use crate::registry::{RegionRegistry, RegistryError};
use crate::synth::{Sensor, synthesize};

#[derive(Clone, Debug)]
pub struct SelectionState {
    region_id: String,
    sensors: Vec<Sensor>,
    active: Option<Sensor>,
    generation: u64,
}

impl SelectionState {
    /// Start with `region_id` selected and freshly synthesized sensors.
    pub fn new<R: Rng + ?Sized>(
        registry: &RegionRegistry,
        region_id: &str,
        rng: &mut R,
    ) -> Result<Self, RegistryError> {
        let region = registry.get(region_id)?;
        Ok(Self {
            region_id: region.id.clone(),
            sensors: synthesize(&region.anchors, region.numeric_id, rng),
            active: None,
            generation: 0,
        })
    }

    /// Switch region and redraw every sensor, even when `region_id` is already selected.
    ///
    /// Unknown ids leave the state untouched.
    pub fn select_region<R: Rng + ?Sized>(
        &mut self,
        registry: &RegionRegistry,
        region_id: &str,
        rng: &mut R,
    ) -> Result<(), RegistryError> {
        let region = registry.get(region_id)?;
        self.sensors = synthesize(&region.anchors, region.numeric_id, rng);
        self.region_id = region.id.clone();
        self.active = None;
        self.generation += 1;
        debug!(
            region = %self.region_id,
            generation = self.generation,
            sensors = self.sensors.len(),
            "region selected"
        );
        Ok(())
    }

    /// Open `sensor` if it is one of the current records. Returns whether it was accepted.
    pub fn select_sensor(&mut self, sensor: &Sensor) -> bool {
        if !self.sensors.contains(sensor) {
            debug!(sensor = sensor.id, "ignoring sensor outside current region");
            return false;
        }
        self.active = Some(sensor.clone());
        true
    }

    pub fn clear_sensor(&mut self) {
        self.active = None;
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn active_sensor(&self) -> Option<&Sensor> {
        self.active.as_ref()
    }

    /// Incremented on every region selection.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
