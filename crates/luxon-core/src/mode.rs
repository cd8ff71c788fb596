//! Input mode state machine.
//!
//! [`ModeController`] decides which source drives the displayed reading:
//! the live sensor feed or a manually set test value. It is a plain reducer
//! updated one event at a time; consumers observe it through a
//! [`tokio::sync::watch`] channel returned by [`ModeController::subscribe`].
//!
//! ```text
//!            enter_test(v)
//!   Live ──────────────────▶ Test
//!    ▲   on_sensor_sample     │   set_test_value
//!    └────────────────────────┘
//!              exit_test
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use luxon_types::InputMode;

/// Lowest value the test slider accepts.
pub const TEST_VALUE_MIN: f32 = 0.0;

/// Highest value the test slider accepts.
pub const TEST_VALUE_MAX: f32 = 1000.0;

/// Test value used the first time test mode is entered.
pub const DEFAULT_TEST_VALUE: f32 = 300.0;

/// Slider granularity (100 positions over the range).
pub const TEST_VALUE_STEP: f32 = 10.0;

/// A one-tap shortcut for a test value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestPreset {
    pub label: &'static str,
    pub lux: f32,
}

/// Shortcuts offered next to the test slider.
pub const TEST_PRESETS: [TestPreset; 3] = [
    TestPreset {
        label: "Düşük (100)",
        lux: 100.0,
    },
    TestPreset {
        label: "İdeal (300)",
        lux: 300.0,
    },
    TestPreset {
        label: "Yüksek (600)",
        lux: 600.0,
    },
];

/// Clamp a value into the test slider range. NaN becomes the minimum.
pub fn clamp_test_value(value: f32) -> f32 {
    if value.is_nan() {
        TEST_VALUE_MIN
    } else {
        value.clamp(TEST_VALUE_MIN, TEST_VALUE_MAX)
    }
}

/// Published state of a [`ModeController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub mode: InputMode,
    /// The reading consumers should display.
    pub reading: f32,
    /// Value test mode uses; retained across test sessions.
    pub test_value: f32,
}

impl Default for ControllerSnapshot {
    fn default() -> Self {
        Self {
            mode: InputMode::Live,
            reading: 0.0,
            test_value: DEFAULT_TEST_VALUE,
        }
    }
}

/// State machine selecting between live sensor input and a manual test value.
///
/// Starts in [`InputMode::Live`] with a reading of 0. Operations that are not
/// valid in the current mode are ignored and return `false`; they do not
/// notify subscribers.
#[derive(Debug)]
pub struct ModeController {
    state: ControllerSnapshot,
    notify: watch::Sender<ControllerSnapshot>,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    /// Create a controller in live mode with reading 0.
    pub fn new() -> Self {
        Self::from_snapshot(ControllerSnapshot::default())
    }

    /// Create a controller whose first test session starts at `test_value`.
    pub fn with_test_value(test_value: f32) -> Self {
        Self::from_snapshot(ControllerSnapshot {
            test_value: clamp_test_value(test_value),
            ..ControllerSnapshot::default()
        })
    }

    fn from_snapshot(state: ControllerSnapshot) -> Self {
        let (notify, _) = watch::channel(state);
        Self { state, notify }
    }

    pub fn mode(&self) -> InputMode {
        self.state.mode
    }

    /// The reading consumers should display.
    pub fn reading(&self) -> f32 {
        self.state.reading
    }

    pub fn test_value(&self) -> f32 {
        self.state.test_value
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.state
    }

    /// Observe state changes. The receiver starts with the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ControllerSnapshot> {
        self.notify.subscribe()
    }

    /// Switch to test mode, showing `initial_test_value` (clamped).
    ///
    /// Calling this while already in test mode re-seeds the test value.
    /// Returns `true` if the mode changed.
    pub fn enter_test(&mut self, initial_test_value: f32) -> bool {
        let value = clamp_test_value(initial_test_value);
        let changed = self.state.mode != InputMode::Test;
        self.state.mode = InputMode::Test;
        self.state.test_value = value;
        self.state.reading = value;
        if changed {
            info!(test_value = value, "Entered test mode");
        }
        self.publish();
        changed
    }

    /// Return to live mode.
    ///
    /// The reading keeps its last value until the next sensor sample.
    /// Returns `true` if the mode changed.
    pub fn exit_test(&mut self) -> bool {
        if self.state.mode != InputMode::Test {
            debug!("exit_test ignored: already live");
            return false;
        }
        self.state.mode = InputMode::Live;
        info!(reading = self.state.reading, "Returned to live mode");
        self.publish();
        true
    }

    /// Set the test value (clamped). Ignored unless in test mode.
    pub fn set_test_value(&mut self, value: f32) -> bool {
        if self.state.mode != InputMode::Test {
            debug!(value, "set_test_value ignored: not in test mode");
            return false;
        }
        let value = clamp_test_value(value);
        self.state.test_value = value;
        self.state.reading = value;
        self.publish();
        true
    }

    /// Apply a sensor sample. Discarded while in test mode.
    pub fn on_sensor_sample(&mut self, lux: f32) -> bool {
        if self.state.mode != InputMode::Live {
            debug!(lux, "Sensor sample discarded in test mode");
            return false;
        }
        self.state.reading = lux;
        self.publish();
        true
    }

    fn publish(&self) {
        self.notify.send_replace(self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let c = ModeController::new();
        assert_eq!(c.mode(), InputMode::Live);
        assert_eq!(c.reading(), 0.0);
        assert_eq!(c.test_value(), DEFAULT_TEST_VALUE);
    }

    #[test]
    fn test_test_mode_discards_sensor_samples() {
        let mut c = ModeController::new();

        assert!(c.enter_test(300.0));
        assert_eq!(c.mode(), InputMode::Test);
        assert_eq!(c.reading(), 300.0);

        assert!(!c.on_sensor_sample(900.0));
        assert_eq!(c.reading(), 300.0);

        assert!(c.exit_test());
        assert!(c.on_sensor_sample(900.0));
        assert_eq!(c.reading(), 900.0);
        assert_eq!(c.mode(), InputMode::Live);
    }

    #[test]
    fn test_exit_keeps_stale_reading_until_sample() {
        let mut c = ModeController::new();
        c.on_sensor_sample(120.0);
        c.enter_test(450.0);
        c.exit_test();
        assert_eq!(c.reading(), 450.0);
    }

    #[test]
    fn test_set_test_value_ignored_while_live() {
        let mut c = ModeController::new();
        c.on_sensor_sample(80.0);
        assert!(!c.set_test_value(500.0));
        assert_eq!(c.reading(), 80.0);
        assert_eq!(c.test_value(), DEFAULT_TEST_VALUE);
    }

    #[test]
    fn test_set_test_value_clamps() {
        let mut c = ModeController::new();
        c.enter_test(300.0);
        assert!(c.set_test_value(1500.0));
        assert_eq!(c.reading(), TEST_VALUE_MAX);
        c.set_test_value(-20.0);
        assert_eq!(c.reading(), TEST_VALUE_MIN);
        c.set_test_value(f32::NAN);
        assert_eq!(c.reading(), TEST_VALUE_MIN);
    }

    #[test]
    fn test_test_value_retained_across_sessions() {
        let mut c = ModeController::new();
        c.enter_test(DEFAULT_TEST_VALUE);
        c.set_test_value(600.0);
        c.exit_test();
        c.on_sensor_sample(42.0);

        c.enter_test(c.test_value());
        assert_eq!(c.reading(), 600.0);
    }

    #[test]
    fn test_exit_while_live_is_noop() {
        let mut c = ModeController::new();
        let rx = c.subscribe();
        assert!(!c.exit_test());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_enter_test_twice_reseeds_value() {
        let mut c = ModeController::new();
        assert!(c.enter_test(100.0));
        assert!(!c.enter_test(250.0));
        assert_eq!(c.reading(), 250.0);
        assert_eq!(c.mode(), InputMode::Test);
    }

    #[test]
    fn test_with_test_value_clamps() {
        let c = ModeController::with_test_value(4000.0);
        assert_eq!(c.test_value(), TEST_VALUE_MAX);
        assert_eq!(c.mode(), InputMode::Live);
    }

    #[test]
    fn test_subscribers_see_transitions() {
        let mut c = ModeController::new();
        let mut rx = c.subscribe();
        assert_eq!(*rx.borrow_and_update(), ControllerSnapshot::default());

        c.enter_test(300.0);
        assert!(rx.has_changed().unwrap());
        let snap = *rx.borrow_and_update();
        assert_eq!(snap.mode, InputMode::Test);
        assert_eq!(snap.reading, 300.0);

        // Rejected operations do not notify.
        c.on_sensor_sample(900.0);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_presets_are_within_range() {
        let values: Vec<f32> = TEST_PRESETS.iter().map(|p| p.lux).collect();
        assert_eq!(values, vec![100.0, 300.0, 600.0]);
        assert!(TEST_PRESETS.iter().all(|p| clamp_test_value(p.lux) == p.lux));
    }
}
