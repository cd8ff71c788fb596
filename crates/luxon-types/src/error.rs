//! Error types for data parsing in luxon-types.

use thiserror::Error;

/// Errors that can occur when parsing light sensor data.
///
/// This error type is platform-agnostic and does not include
/// sensor I/O errors (those belong in luxon-core).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// The input did not contain a numeric value.
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    /// The value parsed but is not a finite number.
    #[error("Value is not finite: {0}")]
    NotFinite(f64),

    /// A color string was not in `#RRGGBB` form.
    #[error("Invalid color: {0:?} (expected #RRGGBB)")]
    InvalidColor(String),
}

/// Result type alias using luxon-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
