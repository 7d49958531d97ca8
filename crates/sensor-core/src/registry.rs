//! Region table: terrain assets and the fixed anchors sensors attach to.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::synth::SENSOR_ID_STRIDE;

/// Sensor ids are `numeric_id * 100 + index`, so a region holds at most this many anchors.
pub const MAX_ANCHORS_PER_REGION: usize = SENSOR_ID_STRIDE as usize;

/// Largest numeric id whose whole sensor id block still fits in a `u32`.
pub const MAX_NUMERIC_ID: u32 = (u32::MAX - (SENSOR_ID_STRIDE - 1)) / SENSOR_ID_STRIDE;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Fixed world-space point where a sensor marker is placed.
pub struct Anchor {
    pub position: [f32; 3],
    pub label: String,
}

impl Anchor {
    pub fn new(x: f32, y: f32, z: f32, label: impl Into<String>) -> Self {
        Self {
            position: [x, y, z],
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// A named mountain dataset.
pub struct Region {
    pub id: String,
    pub numeric_id: u32,
    pub display_name: String,
    pub terrain_asset_path: String,
    pub anchors: Vec<Anchor>,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown region {id:?}")]
    NotFound { id: String },
    #[error("region table is empty")]
    Empty,
    #[error("duplicate region id {id:?}")]
    DuplicateId { id: String },
    #[error("regions {first:?} and {second:?} share numeric id {numeric_id}")]
    DuplicateNumericId {
        numeric_id: u32,
        first: String,
        second: String,
    },
    #[error("region {id:?} has {count} anchors, at most {max} are allowed", max = MAX_ANCHORS_PER_REGION)]
    TooManyAnchors { id: String, count: usize },
    #[error("region {id:?} has numeric id {numeric_id}, at most {max} is allowed", max = MAX_NUMERIC_ID)]
    NumericIdOutOfRange { id: String, numeric_id: u32 },
    #[error("failed to read region file {path:?}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed region file")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct RegionFile {
    regions: Vec<Region>,
}

#[derive(Clone, Debug)]
/// Read-only lookup from region id to [`Region`].
pub struct RegionRegistry {
    regions: Vec<Region>,
}

impl RegionRegistry {
    /// Validate and wrap a region table, preserving its order.
    pub fn new(regions: Vec<Region>) -> Result<Self, RegistryError> {
        if regions.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut ids = HashSet::new();
        for (idx, region) in regions.iter().enumerate() {
            if !ids.insert(region.id.as_str()) {
                return Err(RegistryError::DuplicateId {
                    id: region.id.clone(),
                });
            }
            if region.numeric_id > MAX_NUMERIC_ID {
                return Err(RegistryError::NumericIdOutOfRange {
                    id: region.id.clone(),
                    numeric_id: region.numeric_id,
                });
            }
            if let Some(other) = regions[..idx]
                .iter()
                .find(|other| other.numeric_id == region.numeric_id)
            {
                return Err(RegistryError::DuplicateNumericId {
                    numeric_id: region.numeric_id,
                    first: other.id.clone(),
                    second: region.id.clone(),
                });
            }
            if region.anchors.len() > MAX_ANCHORS_PER_REGION {
                return Err(RegistryError::TooManyAnchors {
                    id: region.id.clone(),
                    count: region.anchors.len(),
                });
            }
        }

        Ok(Self { regions })
    }

    /// The two surveyed regions shipped with the dashboard.
    pub fn builtin() -> Self {
        Self {
            regions: vec![
                Region {
                    id: "m1".into(),
                    numeric_id: 1,
                    display_name: "Kedarnath Massif".into(),
                    terrain_asset_path: "terrain/m1.glb".into(),
                    anchors: vec![
                        Anchor::new(-4.2, 1.1, 3.6, "Base Camp"),
                        Anchor::new(-1.8, 2.4, 1.9, "Moraine Station"),
                        Anchor::new(0.6, 3.7, 0.4, "Glacier Snout"),
                        Anchor::new(2.9, 5.2, -1.3, "North Ridge"),
                        Anchor::new(4.4, 2.0, 2.7, "River Gauge"),
                        Anchor::new(1.2, 6.1, -3.8, "Summit Approach"),
                        Anchor::new(-3.1, 1.6, -2.2, "Village Weather Post"),
                    ],
                },
                Region {
                    id: "m2".into(),
                    numeric_id: 2,
                    display_name: "Valley of Flowers".into(),
                    terrain_asset_path: "terrain/m2.glb".into(),
                    anchors: vec![
                        Anchor::new(-2.6, 1.4, 2.8, "Meadow Station"),
                        Anchor::new(1.7, 3.3, 0.9, "Upper Moraine"),
                        Anchor::new(3.5, 1.2, -2.1, "Stream Junction"),
                        Anchor::new(-0.9, 4.6, -3.0, "Pass Lookout"),
                    ],
                },
            ],
        }
    }

    /// Parse a `{ "regions": [...] }` document.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let file: RegionFile = serde_json::from_str(json)?;
        Self::new(file.regions)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::from_json_str(&json)?;
        debug!(
            "loaded {} regions from {}",
            registry.regions.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Result<&Region, RegistryError> {
        self.regions
            .iter()
            .find(|region| region.id == id)
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.regions.iter().any(|region| region.id == id)
    }

    /// Regions in table order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// First region in table order, used when no initial region is configured.
    pub fn default_region(&self) -> &Region {
        &self.regions[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn region(id: &str, numeric_id: u32, anchors: usize) -> Region {
        Region {
            id: id.into(),
            numeric_id,
            display_name: id.to_uppercase(),
            terrain_asset_path: format!("terrain/{id}.glb"),
            anchors: (0..anchors)
                .map(|i| Anchor::new(i as f32, 0.0, 0.0, format!("a{i}")))
                .collect(),
        }
    }

    #[test]
    fn builtin_has_two_regions() {
        let registry = RegionRegistry::builtin();
        let ids: Vec<_> = registry.regions().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
        assert_eq!(registry.get("m1").unwrap().anchors.len(), 7);
        assert_eq!(registry.get("m2").unwrap().anchors.len(), 4);
        assert_eq!(registry.default_region().id, "m1");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let registry = RegionRegistry::builtin();
        match registry.get("m9") {
            Err(RegistryError::NotFound { id }) => assert_eq!(id, "m9"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(!registry.contains("m9"));
    }

    #[test]
    fn validation_rejects_bad_tables() {
        assert!(matches!(
            RegionRegistry::new(Vec::new()),
            Err(RegistryError::Empty)
        ));
        assert!(matches!(
            RegionRegistry::new(vec![region("a", 1, 1), region("a", 2, 1)]),
            Err(RegistryError::DuplicateId { .. })
        ));
        assert!(matches!(
            RegionRegistry::new(vec![region("a", 1, 1), region("b", 1, 1)]),
            Err(RegistryError::DuplicateNumericId { numeric_id: 1, .. })
        ));
        assert!(matches!(
            RegionRegistry::new(vec![region("a", 1, MAX_ANCHORS_PER_REGION + 1)]),
            Err(RegistryError::TooManyAnchors { count: 101, .. })
        ));
    }

    #[test]
    fn numeric_id_must_leave_room_for_sensor_ids() {
        let json = r#"{
            "regions": [{
                "id": "big",
                "numeric_id": 4294967295,
                "display_name": "Overflow",
                "terrain_asset_path": "terrain/big.glb",
                "anchors": [{ "position": [0.0, 0.0, 0.0], "label": "Only" }]
            }]
        }"#;
        match RegionRegistry::from_json_str(json) {
            Err(RegistryError::NumericIdOutOfRange { id, numeric_id }) => {
                assert_eq!(id, "big");
                assert_eq!(numeric_id, u32::MAX);
            }
            other => panic!("expected NumericIdOutOfRange, got {other:?}"),
        }

        assert!(matches!(
            RegionRegistry::new(vec![region("a", MAX_NUMERIC_ID + 1, 1)]),
            Err(RegistryError::NumericIdOutOfRange { .. })
        ));

        let edge = RegionRegistry::new(vec![region("edge", MAX_NUMERIC_ID, MAX_ANCHORS_PER_REGION)])
            .unwrap();
        let last = crate::synth::sensor_id(MAX_NUMERIC_ID, MAX_ANCHORS_PER_REGION - 1);
        assert_eq!(last, MAX_NUMERIC_ID * 100 + 99);
        assert!(edge.contains("edge"));
    }

    #[test]
    fn loads_region_file() {
        let json = r#"{
            "regions": [{
                "id": "k2",
                "numeric_id": 7,
                "display_name": "Karakoram",
                "terrain_asset_path": "terrain/k2.glb",
                "anchors": [
                    { "position": [1.0, 2.0, 3.0], "label": "Advance Camp" }
                ]
            }]
        }"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let registry = RegionRegistry::from_path(file.path()).unwrap();
        let region = registry.get("k2").unwrap();
        assert_eq!(region.numeric_id, 7);
        assert_eq!(region.anchors[0], Anchor::new(1.0, 2.0, 3.0, "Advance Camp"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RegionRegistry::from_path("/nonexistent/regions.json").unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/regions.json"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = RegionRegistry::from_json_str("{ \"regions\": 3 }").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }
}
