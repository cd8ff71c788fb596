//! Sensor selection shared by the CLI commands and the dashboard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use luxon_core::{DemoSensor, IioDiscovery, IioSensor, LightSensor};
use tracing::debug;

/// Where readings come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SensorSource {
    /// First IIO device exposing an illuminance channel.
    #[default]
    Discover,
    /// A specific IIO device directory.
    Path(PathBuf),
    /// The simulated random-walk sensor.
    Demo,
}

impl SensorSource {
    pub fn new(path: Option<PathBuf>, demo: bool) -> Self {
        match (demo, path) {
            (true, _) => SensorSource::Demo,
            (false, Some(path)) => SensorSource::Path(path),
            (false, None) => SensorSource::Discover,
        }
    }

    /// Build the sensor.
    ///
    /// An explicit path must exist and carry an illuminance channel;
    /// discovery is deferred until the first reading.
    pub fn open(&self) -> Result<Box<dyn LightSensor>> {
        debug!(source = ?self, "Selecting light sensor");
        Ok(match self {
            SensorSource::Discover => Box::new(IioDiscovery::default()),
            SensorSource::Path(path) => Box::new(
                IioSensor::open(path)
                    .with_context(|| format!("Failed to open sensor at {}", path.display()))?,
            ),
            SensorSource::Demo => Box::new(DemoSensor::default()),
        })
    }
}
