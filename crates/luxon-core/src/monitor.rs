//! Light monitoring session.
//!
//! [`LightMonitor`] connects a [`LightSensor`] to a [`ModeController`] and
//! owns the sensor registration. While live it holds a
//! [`SensorSubscription`]; entering test mode releases it and returning to
//! live mode registers again. Dropping the monitor releases the
//! registration too.
//!
//! A missing sensor does not fail the session: the monitor stays live with
//! its last reading and reports [`SensorStatus::Unavailable`]. The same
//! happens once [`UNAVAILABLE_AFTER_FAILURES`] reads in a row fail; the next
//! good sample makes the sensor available again.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use luxon_types::{InputMode, LightStatus, LuxSample};

use crate::classify::classify;
use crate::error::Result;
use crate::events::{EventDispatcher, EventReceiver, LightEvent, SensorStatus};
use crate::gauge::progress;
use crate::mode::{ControllerSnapshot, ModeController};
use crate::streaming::{SampleResult, SensorSubscription, StreamOptions};
use crate::traits::LightSensor;

/// Failed reads in a row before the sensor is reported unavailable.
pub const UNAVAILABLE_AFTER_FAILURES: u32 = 5;

/// A live light monitoring session.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use luxon_core::{InputMode, LightMonitor, MockSensor, StreamOptions};
///
/// #[tokio::main]
/// async fn main() -> luxon_core::Result<()> {
///     let sensor = Arc::new(MockSensor::new("desk"));
///     let mut monitor = LightMonitor::new(Arc::clone(&sensor), StreamOptions::default());
///     monitor.start().await?;
///
///     sensor.push(120.0);
///     monitor.next_reading().await;
///     assert_eq!(monitor.reading(), 120.0);
///
///     monitor.enter_test(300.0);
///     assert_eq!(monitor.mode(), InputMode::Test);
///     assert_eq!(sensor.active_subscriptions(), 0);
///     Ok(())
/// }
/// ```
pub struct LightMonitor<S: LightSensor> {
    sensor: S,
    options: StreamOptions,
    controller: ModeController,
    subscription: Option<SensorSubscription>,
    sensor_status: SensorStatus,
    consecutive_failures: u32,
    events: EventDispatcher,
}

impl<S: LightSensor> LightMonitor<S> {
    /// Create a monitor. Call [`start`](Self::start) to register for samples.
    pub fn new(sensor: S, options: StreamOptions) -> Self {
        Self::with_controller(sensor, options, ModeController::new())
    }

    /// Create a monitor around an existing controller.
    pub fn with_controller(sensor: S, options: StreamOptions, controller: ModeController) -> Self {
        Self {
            sensor,
            options,
            controller,
            subscription: None,
            sensor_status: SensorStatus::Unknown,
            consecutive_failures: 0,
            events: EventDispatcher::default(),
        }
    }

    /// Register for sensor samples if live.
    ///
    /// Only configuration errors are returned; a missing sensor is reported
    /// through [`sensor_status`](Self::sensor_status).
    pub async fn start(&mut self) -> Result<()> {
        self.options.validate()?;
        if self.controller.mode() == InputMode::Live {
            self.acquire().await;
        }
        Ok(())
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn mode(&self) -> InputMode {
        self.controller.mode()
    }

    /// The reading to display.
    pub fn reading(&self) -> f32 {
        self.controller.reading()
    }

    pub fn test_value(&self) -> f32 {
        self.controller.test_value()
    }

    /// Classification of the current reading.
    pub fn status(&self) -> LightStatus {
        classify(self.reading())
    }

    /// Gauge fraction of the current reading.
    pub fn progress(&self) -> f32 {
        progress(self.reading())
    }

    pub fn sensor_status(&self) -> SensorStatus {
        self.sensor_status
    }

    /// Whether a sensor registration is currently held.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.controller.snapshot()
    }

    /// Observe controller state changes.
    pub fn watch(&self) -> watch::Receiver<ControllerSnapshot> {
        self.controller.subscribe()
    }

    /// Subscribe to monitor events.
    pub fn events(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Switch to test mode at `initial_test_value`, releasing the sensor.
    pub fn enter_test(&mut self, initial_test_value: f32) {
        self.release();
        let changed = self.controller.enter_test(initial_test_value);
        if changed {
            self.events.send(LightEvent::ModeChanged {
                mode: InputMode::Test,
                test_value: self.controller.test_value(),
            });
            self.set_sensor_status(SensorStatus::Paused);
        }
        self.emit_reading();
    }

    /// Switch back to live mode and register for samples again.
    ///
    /// The reading stays at its last value until a sample arrives.
    pub async fn exit_test(&mut self) {
        if !self.controller.exit_test() {
            return;
        }
        self.events.send(LightEvent::ModeChanged {
            mode: InputMode::Live,
            test_value: self.controller.test_value(),
        });
        self.acquire().await;
    }

    /// Set the test value. Ignored unless in test mode.
    pub fn set_test_value(&mut self, value: f32) -> bool {
        let accepted = self.controller.set_test_value(value);
        if accepted {
            self.emit_reading();
        }
        accepted
    }

    /// Wait for the next sensor sample and apply it.
    ///
    /// Returns the accepted sample, or `None` if the feed ended. Never
    /// resolves while no registration is held, so it can sit in a `select!`
    /// loop. Failed reads are counted, not returned.
    pub async fn next_reading(&mut self) -> Option<LuxSample> {
        loop {
            let item = match self.subscription.as_mut() {
                Some(subscription) => subscription.recv().await,
                None => std::future::pending().await,
            };
            match item {
                Some(item) => {
                    if let Some(sample) = self.apply(item) {
                        return Some(sample);
                    }
                }
                None => {
                    warn!(sensor = self.sensor.name(), "Sensor feed ended");
                    self.release();
                    self.set_sensor_status(SensorStatus::Unavailable);
                    return None;
                }
            }
        }
    }

    /// Apply every sample already buffered, without waiting.
    ///
    /// Returns the number of samples accepted.
    pub fn drain_pending(&mut self) -> usize {
        let mut accepted = 0;
        while let Some(item) = self.subscription.as_mut().and_then(|s| s.try_recv()) {
            if self.apply(item).is_some() {
                accepted += 1;
            }
        }
        accepted
    }

    /// Release the sensor registration. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.release();
    }

    fn apply(&mut self, item: SampleResult) -> Option<LuxSample> {
        match item {
            Ok(sample) => {
                if !self.controller.on_sensor_sample(sample.lux) {
                    return None;
                }
                if self.consecutive_failures >= UNAVAILABLE_AFTER_FAILURES {
                    info!(sensor = self.sensor.name(), "Light sensor responding again");
                }
                self.consecutive_failures = 0;
                if self.sensor_status != SensorStatus::Available {
                    self.set_sensor_status(SensorStatus::Available);
                }
                self.emit_reading();
                Some(sample)
            }
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                if self.consecutive_failures == UNAVAILABLE_AFTER_FAILURES {
                    warn!(
                        sensor = self.sensor.name(),
                        error = %e,
                        failures = self.consecutive_failures,
                        "Light sensor stopped responding"
                    );
                    self.set_sensor_status(SensorStatus::Unavailable);
                } else {
                    debug!(error = %e, failures = self.consecutive_failures, "Skipping failed sensor sample");
                }
                None
            }
        }
    }

    async fn acquire(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        self.consecutive_failures = 0;
        // Failed reads must reach the monitor to be counted.
        let options = StreamOptions {
            include_errors: true,
            ..self.options.clone()
        };
        match self.sensor.subscribe(options).await {
            Ok(subscription) => {
                info!(sensor = self.sensor.name(), "Registered for light samples");
                self.subscription = Some(subscription);
                if self.sensor_status != SensorStatus::Available {
                    self.set_sensor_status(SensorStatus::Available);
                }
            }
            Err(e) => {
                warn!(sensor = self.sensor.name(), error = %e, "Light sensor unavailable");
                self.set_sensor_status(SensorStatus::Unavailable);
            }
        }
    }

    fn release(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
            info!(sensor = self.sensor.name(), "Unregistered from light samples");
        }
    }

    fn set_sensor_status(&mut self, status: SensorStatus) {
        self.sensor_status = status;
        self.events.send(LightEvent::SensorStatus { status });
    }

    fn emit_reading(&self) {
        self.events.send(LightEvent::reading(self.reading(), self.mode()));
    }
}

impl<S: LightSensor> Drop for LightMonitor<S> {
    fn drop(&mut self) {
        self.release();
    }
}
