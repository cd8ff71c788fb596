//! Core types for ambient light data.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ParseError;

/// An sRGB display color.
///
/// Serialized as a `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    ///
    /// ```
    /// use luxon_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex(0xC56A67), Rgb::new(0xC5, 0x6A, 0x67));
    /// ```
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Packed `0xRRGGBB` value.
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ParseError::InvalidColor(s.to_string()))?;
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ParseError::InvalidColor(s.to_string()))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Comfort band of an illuminance reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LightCategory {
    /// Too dark for comfortable work.
    Low,
    /// Comfortable working light.
    Ideal,
    /// Brighter than comfortable.
    High,
}

impl LightCategory {
    /// All categories, darkest first.
    pub const ALL: [LightCategory; 3] = [
        LightCategory::Low,
        LightCategory::Ideal,
        LightCategory::High,
    ];

    /// Short English label, used in logs and CSV output.
    pub fn label(&self) -> &'static str {
        match self {
            LightCategory::Low => "low",
            LightCategory::Ideal => "ideal",
            LightCategory::High => "high",
        }
    }
}

impl fmt::Display for LightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display attributes for a classified reading.
///
/// Values are fixed per category; see `luxon_core::classify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LightStatus {
    /// Comfort band.
    pub category: LightCategory,
    /// Short status line.
    pub message: &'static str,
    /// Guidance text.
    pub description: &'static str,
    /// Gauge and highlight color.
    pub accent_color: Rgb,
    /// Color for the status message.
    pub text_color: Rgb,
}

/// Source currently driving the displayed reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputMode {
    /// Readings come from the light sensor.
    #[default]
    Live,
    /// Readings are set manually.
    Test,
}

impl InputMode {
    pub fn is_test(&self) -> bool {
        matches!(self, InputMode::Test)
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Live => f.write_str("live"),
            InputMode::Test => f.write_str("test"),
        }
    }
}

/// A single illuminance sample delivered by a sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LuxSample {
    /// Illuminance in lux. Not clamped.
    pub lux: f32,
    /// When the sample was taken.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub captured_at: OffsetDateTime,
}

impl LuxSample {
    /// Create a sample stamped with the current UTC time.
    pub fn now(lux: f32) -> Self {
        Self {
            lux,
            captured_at: OffsetDateTime::now_utc(),
        }
    }

    /// Create a sample with an explicit timestamp.
    pub fn at(lux: f32, captured_at: OffsetDateTime) -> Self {
        Self { lux, captured_at }
    }

    /// Reading truncated to whole lux, as shown on the gauge.
    pub fn whole_lux(&self) -> i32 {
        self.lux as i32
    }
}
