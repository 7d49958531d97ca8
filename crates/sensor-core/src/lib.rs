//! Engine-independent model behind the cloudburst dashboard: the region
//! table, mocked sensor telemetry, selection state and the view data the
//! viewer renders from it.

pub mod camera;
pub mod loading;
pub mod panel;
pub mod registry;
pub mod risk;
pub mod selection;
pub mod synth;

pub use camera::CameraSample;
pub use loading::{LoadOutcome, LoadPhase, LoadTracker};
pub use panel::{DetailView, MetricIcon, MetricRow};
pub use registry::{Anchor, Region, RegionRegistry, RegistryError};
pub use risk::{MarkerAppearance, Rgb, Risk, RiskStyle};
pub use selection::SelectionState;
pub use synth::{Reading, Sensor, Unit, synthesize};
