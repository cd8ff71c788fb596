//! Application state for the TUI.
//!
//! The state mirrors what the background worker reports. Only the slider
//! value is changed locally first, so it responds without waiting for the
//! worker's echo.

use std::time::{Duration, Instant};

use luxon_core::{
    InputMode, LightStatus, MonitorUpdate, SensorStatus, clamp_test_value, classify, progress,
};
use tokio::sync::mpsc;

/// How long a status bar message stays visible.
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(4);

/// Dialogs drawn over the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Recommendations,
    Info,
    TestMode,
    Help,
}

/// Main application state.
pub struct App {
    /// Reading shown on the gauge.
    pub reading: f32,
    pub mode: InputMode,
    /// Slider position, kept while live so the next test session resumes it.
    pub test_value: f32,
    pub sensor_status: SensorStatus,
    pub sensor_name: Option<String>,
    pub overlay: Option<Overlay>,
    pub should_quit: bool,
    /// Set once the worker has released the sensor and exited.
    pub worker_stopped: bool,
    status_messages: Vec<(String, Instant)>,
    pub update_rx: mpsc::Receiver<MonitorUpdate>,
}

impl App {
    pub fn new(update_rx: mpsc::Receiver<MonitorUpdate>, test_value: f32) -> Self {
        Self {
            reading: 0.0,
            mode: InputMode::Live,
            test_value: clamp_test_value(test_value),
            sensor_status: SensorStatus::Unknown,
            sensor_name: None,
            overlay: None,
            should_quit: false,
            worker_stopped: false,
            status_messages: Vec::new(),
            update_rx,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Classification of the displayed reading.
    pub fn status(&self) -> LightStatus {
        classify(self.reading)
    }

    /// Gauge fraction of the displayed reading.
    pub fn progress(&self) -> f32 {
        progress(self.reading)
    }

    /// The reading as displayed: truncated toward zero.
    pub fn display_lux(&self) -> i32 {
        self.reading as i32
    }

    /// Live, but nothing to read from.
    pub fn sensor_missing(&self) -> bool {
        self.mode == InputMode::Live && self.sensor_status == SensorStatus::Unavailable
    }

    pub fn toggle_overlay(&mut self, overlay: Overlay) {
        self.overlay = if self.overlay == Some(overlay) {
            None
        } else {
            Some(overlay)
        };
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Add a status message to the queue.
    pub fn push_status_message(&mut self, message: impl Into<String>) {
        self.status_messages.push((message.into(), Instant::now()));
        while self.status_messages.len() > 5 {
            self.status_messages.remove(0);
        }
    }

    /// Remove expired status messages.
    pub fn clean_expired_messages(&mut self) {
        self.status_messages
            .retain(|(_, created)| created.elapsed() < STATUS_MESSAGE_TIMEOUT);
    }

    pub fn current_status_message(&self) -> Option<&str> {
        self.status_messages.last().map(|(msg, _)| msg.as_str())
    }

    /// Apply an update from the worker.
    pub fn handle_update(&mut self, update: MonitorUpdate) {
        match update {
            MonitorUpdate::Reading { lux, mode } => {
                self.reading = lux;
                self.mode = mode;
                if mode.is_test() {
                    self.test_value = lux;
                }
            }
            MonitorUpdate::ModeChanged { mode, test_value } => {
                self.mode = mode;
                self.test_value = test_value;
                self.push_status_message(match mode {
                    InputMode::Test => "Test modu açıldı",
                    InputMode::Live => "Test modu kapatıldı",
                });
            }
            MonitorUpdate::SensorStatus { status, sensor } => {
                if status == SensorStatus::Unavailable && self.sensor_status != status {
                    self.push_status_message("Işık sensörü bulunamadı");
                }
                self.sensor_status = status;
                self.sensor_name = Some(sensor);
            }
            MonitorUpdate::Stopped => {
                self.worker_stopped = true;
            }
        }
    }
}
