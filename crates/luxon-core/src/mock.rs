//! Mock light sensor for testing.
//!
//! [`MockSensor`] implements [`LightSensor`] without hardware. Tests push
//! samples with [`MockSensor::push`] and can check how many subscriptions
//! are still registered, which makes release behavior observable.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use luxon_types::LuxSample;

use crate::error::{Error, Result};
use crate::streaming::{SampleResult, SensorSubscription, StreamOptions};
use crate::traits::LightSensor;

/// A scriptable light sensor.
///
/// # Example
///
/// ```
/// use luxon_core::{LightSensor, MockSensor, StreamOptions};
///
/// #[tokio::main]
/// async fn main() {
///     let sensor = MockSensor::new("desk");
///     let mut sub = sensor.subscribe(StreamOptions::default()).await.unwrap();
///
///     sensor.push(420.0);
///     assert_eq!(sub.recv().await.unwrap().unwrap().lux, 420.0);
///
///     sub.release();
///     assert_eq!(sensor.active_subscriptions(), 0);
/// }
/// ```
#[derive(Debug)]
pub struct MockSensor {
    name: String,
    available: AtomicBool,
    current: Mutex<f32>,
    subscribers: Mutex<Vec<mpsc::Sender<SampleResult>>>,
    subscribe_count: AtomicU32,
}

impl MockSensor {
    /// Create an available mock sensor reading 0 lux.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            available: AtomicBool::new(true),
            current: Mutex::new(0.0),
            subscribers: Mutex::new(Vec::new()),
            subscribe_count: AtomicU32::new(0),
        }
    }

    /// Create a mock that behaves like a host without a light sensor.
    pub fn unavailable(name: &str) -> Self {
        let sensor = Self::new(name);
        sensor.set_available(false);
        sensor
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    /// Deliver a sample to every registered subscriber.
    ///
    /// Also becomes the value returned by [`LightSensor::read_once`].
    /// Returns the number of subscribers that received it.
    pub fn push(&self, lux: f32) -> usize {
        self.push_sample(LuxSample::now(lux))
    }

    /// Like [`push`](Self::push), keeping the sample's own timestamp.
    pub fn push_sample(&self, sample: LuxSample) -> usize {
        *self.current.lock().expect("mock lock poisoned") = sample.lux;
        self.deliver(|| Ok(sample))
    }

    /// Deliver a failed read to every registered subscriber.
    pub fn push_failure(&self, message: &str) -> usize {
        let path = format!("/mock/{}", self.name);
        self.deliver(|| Err(Error::io(&path, std::io::Error::other(message.to_string()))))
    }

    fn deliver(&self, item: impl Fn() -> SampleResult) -> usize {
        let mut subscribers = self.subscribers.lock().expect("mock lock poisoned");
        subscribers.retain(|tx| !tx.is_closed());
        subscribers
            .iter()
            .filter(|tx| tx.try_send(item()).is_ok())
            .count()
    }

    /// Number of subscriptions not yet released.
    pub fn active_subscriptions(&self) -> usize {
        let mut subscribers = self.subscribers.lock().expect("mock lock poisoned");
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }

    /// Total number of successful `subscribe` calls.
    pub fn subscribe_count(&self) -> u32 {
        self.subscribe_count.load(Ordering::Relaxed)
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(Error::SensorNotFound(format!("{} is unavailable", self.name)))
        }
    }
}

#[async_trait]
impl LightSensor for MockSensor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_once(&self) -> Result<LuxSample> {
        self.check_available()?;
        Ok(LuxSample::now(*self.current.lock().expect("mock lock poisoned")))
    }

    async fn subscribe(&self, options: StreamOptions) -> Result<SensorSubscription> {
        options.validate()?;
        self.check_available()?;
        let (tx, rx) = mpsc::channel(options.buffer_size);
        self.subscribers.lock().expect("mock lock poisoned").push(tx);
        self.subscribe_count.fetch_add(1, Ordering::Relaxed);
        Ok(SensorSubscription::new(rx, CancellationToken::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_push_reaches_all_subscribers() {
        let sensor = MockSensor::new("mock");
        let mut a = sensor.subscribe(StreamOptions::default()).await.unwrap();
        let mut b = sensor.subscribe(StreamOptions::default()).await.unwrap();

        assert_eq!(sensor.push(75.0), 2);
        assert_eq!(a.recv().await.unwrap().unwrap().lux, 75.0);
        assert_eq!(b.recv().await.unwrap().unwrap().lux, 75.0);
        assert_eq!(sensor.subscribe_count(), 2);
    }

    #[tokio::test]
    async fn test_released_subscription_stops_receiving() {
        let sensor = MockSensor::new("mock");
        let mut sub = sensor.subscribe(StreamOptions::default()).await.unwrap();
        assert_eq!(sensor.active_subscriptions(), 1);

        sub.release();
        assert_eq!(sensor.active_subscriptions(), 0);
        assert_eq!(sensor.push(10.0), 0);
    }

    #[tokio::test]
    async fn test_dropped_subscription_is_released() {
        let sensor = MockSensor::new("mock");
        drop(sensor.subscribe(StreamOptions::default()).await.unwrap());
        assert_eq!(sensor.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_push_sample_and_failure() {
        let sensor = MockSensor::new("mock");
        let mut sub = sensor.subscribe(StreamOptions::default()).await.unwrap();

        let captured_at = time::OffsetDateTime::from_unix_timestamp(1_709_281_800).unwrap();
        let sample = LuxSample::at(250.0, captured_at);
        assert_eq!(sensor.push_sample(sample), 1);
        assert_eq!(sub.recv().await.unwrap().unwrap(), sample);

        assert_eq!(sensor.push_failure("i/o timeout"), 1);
        let err = sub.recv().await.unwrap().unwrap_err();
        assert!(err.to_string().contains("i/o timeout"));
        assert_eq!(sensor.read_once().await.unwrap().lux, 250.0);
    }

    #[tokio::test]
    async fn test_unavailable_sensor() {
        let sensor = MockSensor::unavailable("none");
        let err = sensor.subscribe(StreamOptions::default()).await.unwrap_err();
        assert!(err.is_sensor_missing());
        assert!(sensor.read_once().await.is_err());

        sensor.set_available(true);
        sensor.push(33.0);
        assert_eq!(sensor.read_once().await.unwrap().lux, 33.0);
    }
}
