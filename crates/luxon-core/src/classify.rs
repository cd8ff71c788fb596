//! Illuminance comfort bands and their display attributes.
//!
//! Every reading falls into exactly one band:
//!
//! | Reading (lux)       | Category | Message                    |
//! |---------------------|----------|----------------------------|
//! | below 150           | Low      | Ortam ışığı yetersiz       |
//! | 150 to 600 inclusive| Ideal    | Ortam ışığı ideal          |
//! | above 600           | High     | Ortam ışığı fazla parlak   |
//!
//! # Example
//!
//! ```
//! use luxon_core::{classify, LightCategory};
//!
//! let status = classify(100.0);
//! assert_eq!(status.category, LightCategory::Low);
//! assert_eq!(status.message, "Ortam ışığı yetersiz");
//! ```

use luxon_types::{LightCategory, LightStatus, Rgb};

/// Readings strictly below this are [`LightCategory::Low`].
pub const LOW_THRESHOLD_LUX: f32 = 150.0;

/// Readings strictly above this are [`LightCategory::High`].
pub const HIGH_THRESHOLD_LUX: f32 = 600.0;

/// Reddish orange used for insufficient light.
pub const LOW_COLOR: Rgb = Rgb::from_hex(0xC56A67);

/// Green used for the ideal band.
pub const IDEAL_COLOR: Rgb = Rgb::from_hex(0x548D6F);

/// Golden yellow used for excessive light.
pub const HIGH_COLOR: Rgb = Rgb::from_hex(0xD4AF63);

const LOW_STATUS: LightStatus = LightStatus {
    category: LightCategory::Low,
    message: "Ortam ışığı yetersiz",
    description: "Daha iyi bir çalışma ortamı için ışığı artırın.",
    accent_color: LOW_COLOR,
    text_color: LOW_COLOR,
};

const IDEAL_STATUS: LightStatus = LightStatus {
    category: LightCategory::Ideal,
    message: "Ortam ışığı ideal",
    description: "Göz konforu için mükemmel denge.",
    accent_color: IDEAL_COLOR,
    text_color: IDEAL_COLOR,
};

const HIGH_STATUS: LightStatus = LightStatus {
    category: LightCategory::High,
    message: "Ortam ışığı fazla parlak",
    description: "Göz konforu için ışığı azaltmayı düşünün.",
    accent_color: HIGH_COLOR,
    text_color: HIGH_COLOR,
};

/// Comfort band for a reading.
///
/// Total over `f32`: negative readings are Low, and NaN (which compares
/// false against both thresholds) lands in Ideal.
pub fn category(lux: f32) -> LightCategory {
    if lux < LOW_THRESHOLD_LUX {
        LightCategory::Low
    } else if lux > HIGH_THRESHOLD_LUX {
        LightCategory::High
    } else {
        LightCategory::Ideal
    }
}

/// The fixed display record for a category.
pub fn status_for(category: LightCategory) -> LightStatus {
    match category {
        LightCategory::Low => LOW_STATUS,
        LightCategory::Ideal => IDEAL_STATUS,
        LightCategory::High => HIGH_STATUS,
    }
}

/// Classify a reading into its display record.
pub fn classify(lux: f32) -> LightStatus {
    status_for(category(lux))
}
