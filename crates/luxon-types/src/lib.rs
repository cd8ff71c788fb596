//! Platform-agnostic types for Luxon ambient light monitoring.
//!
//! This crate provides the data types shared by the sensor core
//! (luxon-core) and the presentation layer (luxon-cli).
//!
//! # Example
//!
//! ```
//! use luxon_types::{LightCategory, LuxSample, Rgb};
//!
//! let sample = LuxSample::now(312.8);
//! assert_eq!(sample.whole_lux(), 312);
//! assert_eq!(Rgb::from_hex(0x548D6F).to_string(), "#548D6F");
//! assert_eq!(LightCategory::Ideal.label(), "ideal");
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{InputMode, LightCategory, LightStatus, LuxSample, Rgb};
