//! Trait abstractions for ambient light sensors.
//!
//! This module provides the [`LightSensor`] trait that abstracts over the
//! Linux IIO sensor, the simulated demo sensor and mock sensors for testing.

use async_trait::async_trait;

use luxon_types::LuxSample;

use crate::error::Result;
use crate::streaming::{SensorSubscription, StreamOptions};

/// A source of illuminance samples.
///
/// # Example
///
/// ```ignore
/// use luxon_core::{LightSensor, StreamOptions, classify};
///
/// async fn print_levels<S: LightSensor>(sensor: &S) -> luxon_core::Result<()> {
///     let mut sub = sensor.subscribe(StreamOptions::default()).await?;
///     while let Some(Ok(sample)) = sub.recv().await {
///         println!("{} lux: {}", sample.lux, classify(sample.lux).message);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait LightSensor: Send + Sync {
    /// Human-readable sensor name.
    fn name(&self) -> &str;

    /// Take a single reading.
    async fn read_once(&self) -> Result<LuxSample>;

    /// Register for samples at the cadence given by `options`.
    ///
    /// The registration lasts until the returned handle is released or
    /// dropped. Returns [`crate::Error::SensorNotFound`] when the sensor
    /// cannot deliver samples at all.
    async fn subscribe(&self, options: StreamOptions) -> Result<SensorSubscription>;
}

#[async_trait]
impl<S: LightSensor + ?Sized> LightSensor for std::sync::Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn read_once(&self) -> Result<LuxSample> {
        (**self).read_once().await
    }

    async fn subscribe(&self, options: StreamOptions) -> Result<SensorSubscription> {
        (**self).subscribe(options).await
    }
}

#[async_trait]
impl<S: LightSensor + ?Sized> LightSensor for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn read_once(&self) -> Result<LuxSample> {
        (**self).read_once().await
    }

    async fn subscribe(&self, options: StreamOptions) -> Result<SensorSubscription> {
        (**self).subscribe(options).await
    }
}
