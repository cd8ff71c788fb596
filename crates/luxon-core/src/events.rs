//! Light monitor event system.
//!
//! [`crate::LightMonitor`] publishes a [`LightEvent`] whenever the displayed
//! reading, the input mode or the sensor availability changes. Events are
//! broadcast, so any number of consumers (dashboard, `watch` output, logs)
//! can follow the same monitor.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use luxon_types::{InputMode, LightCategory};

/// Availability of the live sensor feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStatus {
    /// Not probed yet.
    #[default]
    Unknown,
    /// A sensor is delivering samples.
    Available,
    /// No compatible sensor; the reading stays where it is.
    Unavailable,
    /// The feed is intentionally paused (test mode).
    Paused,
}

impl SensorStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SensorStatus::Unknown => "unknown",
            SensorStatus::Available => "available",
            SensorStatus::Unavailable => "no sensor",
            SensorStatus::Paused => "paused",
        }
    }
}

/// Events emitted by a light monitor.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new event types
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum LightEvent {
    /// The displayed reading changed.
    Reading {
        lux: f32,
        category: LightCategory,
        progress: f32,
        mode: InputMode,
    },
    /// The input mode changed.
    ModeChanged { mode: InputMode, test_value: f32 },
    /// Sensor availability changed.
    SensorStatus { status: SensorStatus },
}

impl LightEvent {
    /// Build a reading event for `lux`, deriving category and gauge progress.
    pub fn reading(lux: f32, mode: InputMode) -> Self {
        LightEvent::Reading {
            lux,
            category: crate::classify::category(lux),
            progress: crate::gauge::progress(lux),
            mode,
        }
    }
}

/// Sender for light events.
pub type EventSender = broadcast::Sender<LightEvent>;

/// Receiver for light events.
pub type EventReceiver = broadcast::Receiver<LightEvent>;

/// Event dispatcher for sending events to multiple receivers.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    sender: EventSender,
}

impl EventDispatcher {
    /// Create a new event dispatcher.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events.
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Send an event.
    pub fn send(&self, event: LightEvent) {
        // Ignore error if no receivers
        let _ = self.sender.send(event);
    }

    /// Get the number of active receivers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(64)
    }
}
