//! Ambient light classification and sensor access for Luxon.
//!
//! This crate turns illuminance readings into a comfort category, maps them
//! onto a gauge, and manages the choice between live sensor input and a
//! user-controlled test value.
//!
//! # Features
//!
//! - **Classification**: three comfort bands split at 150 and 600 lux
//! - **Gauge mapping**: readings clamped onto `[0, 1]` over 0..1000 lux
//! - **Input modes**: a [`ModeController`] arbitrating sensor and test input
//! - **Sensors**: Linux IIO devices, a simulated demo source and a mock
//! - **Monitoring**: [`LightMonitor`] holds the sensor registration only
//!   while live
//!
//! # Quick Start
//!
//! ```
//! use luxon_core::{LightCategory, classify, progress};
//!
//! let status = classify(120.0);
//! assert_eq!(status.category, LightCategory::Low);
//! assert_eq!(status.message, "Ortam ışığı yetersiz");
//! assert_eq!(progress(1500.0), 1.0);
//! ```

pub mod advice;
pub mod classify;
pub mod demo;
pub mod error;
pub mod events;
pub mod gauge;
pub mod iio;
pub mod messages;
pub mod mock;
pub mod mode;
pub mod monitor;
pub mod streaming;
pub mod traits;

pub use luxon_types::types;

pub use advice::{current_level_line, recommendation_lines, recommendations};
pub use classify::{
    HIGH_COLOR, HIGH_THRESHOLD_LUX, IDEAL_COLOR, LOW_COLOR, LOW_THRESHOLD_LUX, category, classify,
    status_for,
};
pub use demo::DemoSensor;
pub use error::{Error, Result};
pub use events::{EventDispatcher, EventReceiver, EventSender, LightEvent, SensorStatus};
pub use gauge::{GAUGE_FULL_SCALE_LUX, progress};
pub use iio::{IioDiscovery, IioSensor, IlluminanceSource};
pub use messages::{Command, MonitorUpdate};
pub use mock::MockSensor;
pub use mode::{
    ControllerSnapshot, DEFAULT_TEST_VALUE, ModeController, TEST_PRESETS, TEST_VALUE_MAX,
    TEST_VALUE_MIN, TEST_VALUE_STEP, TestPreset, clamp_test_value,
};
pub use monitor::{LightMonitor, UNAVAILABLE_AFTER_FAILURES};
pub use streaming::{SampleResult, SensorSubscription, StreamOptions, StreamOptionsBuilder};
pub use traits::LightSensor;

pub use luxon_types::{
    InputMode, LightCategory, LightStatus, LuxSample, ParseError, ParseResult, Rgb,
};
