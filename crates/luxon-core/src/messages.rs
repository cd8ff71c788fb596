//! Message types for UI/worker communication.
//!
//! ```text
//! +------------------+     Command      +------------------+
//! |    UI Thread     | --------------> |  MonitorWorker   |
//! |    (ratatui)     |                 |  (tokio runtime) |
//! |                  | <-------------- |                  |
//! +------------------+  MonitorUpdate  +------------------+
//! ```

use luxon_types::InputMode;

use crate::events::SensorStatus;

/// Commands sent from the UI to the background worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch to test mode at the given value. The sensor is released.
    EnterTest { test_value: f32 },

    /// Return to live mode. The sensor is registered again.
    ExitTest,

    /// Update the test value. Ignored while live.
    SetTestValue { value: f32 },

    /// Release the sensor and stop the worker.
    Shutdown,
}

/// Updates sent from the worker back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorUpdate {
    /// The displayed reading changed.
    Reading { lux: f32, mode: InputMode },

    /// The input mode changed.
    ModeChanged { mode: InputMode, test_value: f32 },

    /// Sensor availability changed.
    SensorStatus {
        status: SensorStatus,
        sensor: String,
    },

    /// The worker stopped.
    Stopped,
}
