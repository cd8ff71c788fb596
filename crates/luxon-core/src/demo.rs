//! Simulated light sensor for hosts without hardware.
//!
//! [`DemoSensor`] wanders through all three comfort bands with a bounded
//! random walk, so the dashboard can be tried on any machine.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::Rng;

use luxon_types::LuxSample;

use crate::error::Result;
use crate::streaming::{SensorSubscription, StreamOptions};
use crate::traits::LightSensor;

/// Upper bound of the simulated reading.
pub const DEMO_MAX_LUX: f32 = 1200.0;

/// Largest change between two consecutive samples.
pub const DEMO_MAX_STEP_LUX: f32 = 40.0;

/// A random-walk illuminance generator.
#[derive(Debug, Clone)]
pub struct DemoSensor {
    level: Arc<Mutex<f32>>,
}

impl Default for DemoSensor {
    fn default() -> Self {
        Self::new(320.0)
    }
}

impl DemoSensor {
    /// Start the walk at `start_lux` (clamped to the simulated range).
    pub fn new(start_lux: f32) -> Self {
        Self {
            level: Arc::new(Mutex::new(start_lux.clamp(0.0, DEMO_MAX_LUX))),
        }
    }

    /// Advance the walk and return the new level.
    pub fn step(&self) -> f32 {
        let delta = rand::rng().random_range(-DEMO_MAX_STEP_LUX..=DEMO_MAX_STEP_LUX);
        let mut level = self.level.lock().expect("demo lock poisoned");
        *level = (*level + delta).clamp(0.0, DEMO_MAX_LUX);
        *level
    }
}

#[async_trait]
impl LightSensor for DemoSensor {
    fn name(&self) -> &str {
        "demo"
    }

    async fn read_once(&self) -> Result<LuxSample> {
        Ok(LuxSample::now(self.step()))
    }

    async fn subscribe(&self, options: StreamOptions) -> Result<SensorSubscription> {
        options.validate()?;
        let sensor = self.clone();
        Ok(SensorSubscription::polling(options, move || {
            let sample = LuxSample::now(sensor.step());
            async move { Ok(sample) }
        }))
    }
}
