//! Gauge progress for illuminance readings.
//!
//! The gauge spans 0 to [`GAUGE_FULL_SCALE_LUX`]. The fraction only drives
//! the visual indicator and carries no classification meaning.

/// Reading at which the gauge is full.
pub const GAUGE_FULL_SCALE_LUX: f32 = 1000.0;

/// Map a reading to a gauge fraction in `[0, 1]`.
///
/// Readings at or above full scale saturate at 1, readings at or below zero
/// floor at 0. NaN maps to 0.
///
/// ```
/// use luxon_core::progress;
///
/// assert_eq!(progress(500.0), 0.5);
/// assert_eq!(progress(1500.0), 1.0);
/// assert_eq!(progress(-50.0), 0.0);
/// ```
pub fn progress(lux: f32) -> f32 {
    let fraction = lux / GAUGE_FULL_SCALE_LUX;
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_scenario_progress() {
        assert!(approx(progress(100.0), 0.1));
        assert!(approx(progress(300.0), 0.3));
        assert!(approx(progress(700.0), 0.7));
        assert_eq!(progress(1200.0), 1.0);
    }

    #[test]
    fn test_saturation_and_floor() {
        assert_eq!(progress(-50.0), 0.0);
        assert_eq!(progress(0.0), 0.0);
        assert_eq!(progress(1000.0), 1.0);
        assert_eq!(progress(1500.0), 1.0);
        assert_eq!(progress(500.0), 0.5);
    }

    #[test]
    fn test_non_finite_inputs() {
        assert_eq!(progress(f32::INFINITY), 1.0);
        assert_eq!(progress(f32::NEG_INFINITY), 0.0);
        assert_eq!(progress(f32::NAN), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn matches_clamped_ratio(lux in -5000.0f32..5000.0) {
                let expected = (lux / 1000.0).clamp(0.0, 1.0);
                prop_assert_eq!(progress(lux), expected);
            }

            #[test]
            fn stays_in_unit_interval(lux in proptest::num::f32::ANY) {
                let p = progress(lux);
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }
    }
}
