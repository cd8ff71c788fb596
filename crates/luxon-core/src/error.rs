//! Error types for luxon-core.
//!
//! The classifier, the gauge mapper and the mode controller never fail.
//! Errors only come from talking to a light sensor.
//!
//! A missing sensor ([`Error::SensorNotFound`]) is not fatal for the
//! application: [`crate::LightMonitor`] treats it as degraded data, keeps the
//! reading at its last value and reports [`crate::SensorStatus::Unavailable`].

use std::path::PathBuf;

use thiserror::Error;

use luxon_types::ParseError;

/// Errors that can occur when reading a light sensor.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No compatible light sensor is present.
    #[error("No light sensor found: {0}")]
    SensorNotFound(String),

    /// Reading a sensor attribute failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sensor returned a value that could not be parsed.
    #[error("Invalid sensor data: {0}")]
    Parse(#[from] ParseError),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The subscription was released while an operation was pending.
    #[error("Operation cancelled")]
    Cancelled,
}

impl Error {
    /// Build an [`Error::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means no sensor is available at all.
    pub fn is_sensor_missing(&self) -> bool {
        matches!(self, Error::SensorNotFound(_))
    }
}

/// Result type alias using luxon-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
