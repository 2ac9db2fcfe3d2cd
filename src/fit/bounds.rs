//! Bounded-parameter change of variables
//!
//! The Levenberg-Marquardt solver is unconstrained, so bounded parameters
//! are minimized in an internal coordinate and mapped back through the
//! MINUIT-style transform:
//!
//! - both bounds: `ext = min + (sin(int) + 1)/2 · (max - min)`
//! - lower only:  `ext = min - 1 + sqrt(int² + 1)`
//! - upper only:  `ext = max + 1 - sqrt(int² + 1)`
//! - unbounded:   `ext = int`

/// Map a bounded external value to the solver's internal coordinate
pub(crate) fn to_internal(ext: f64, min: f64, max: f64) -> f64 {
    match (min.is_finite(), max.is_finite()) {
        (true, true) => (2.0 * (ext - min) / (max - min) - 1.0)
            .clamp(-1.0, 1.0)
            .asin(),
        (true, false) => ((ext - min + 1.0).powi(2) - 1.0).max(0.0).sqrt(),
        (false, true) => ((max - ext + 1.0).powi(2) - 1.0).max(0.0).sqrt(),
        (false, false) => ext,
    }
}

/// Map an internal coordinate back to the bounded external value
pub(crate) fn to_external(int: f64, min: f64, max: f64) -> f64 {
    match (min.is_finite(), max.is_finite()) {
        (true, true) => min + (int.sin() + 1.0) / 2.0 * (max - min),
        (true, false) => min - 1.0 + (int * int + 1.0).sqrt(),
        (false, true) => max + 1.0 - (int * int + 1.0).sqrt(),
        (false, false) => int,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip_both_bounds() {
        for &ext in &[0.0, 0.25, 2.0, 9.9] {
            let int = to_internal(ext, 0.0, 10.0);
            assert_relative_eq!(to_external(int, 0.0, 10.0), ext, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_round_trip_lower_bound() {
        for &ext in &[0.0, 0.1, 5.0, 1e6] {
            let int = to_internal(ext, 0.0, f64::INFINITY);
            assert_relative_eq!(
                to_external(int, 0.0, f64::INFINITY),
                ext,
                epsilon = 1e-9,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_round_trip_upper_bound() {
        for &ext in &[-3.0, 0.0, 0.99] {
            let int = to_internal(ext, f64::NEG_INFINITY, 1.0);
            assert_relative_eq!(to_external(int, f64::NEG_INFINITY, 1.0), ext, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_unbounded_is_identity() {
        assert_eq!(to_internal(4.2, f64::NEG_INFINITY, f64::INFINITY), 4.2);
        assert_eq!(to_external(-7.0, f64::NEG_INFINITY, f64::INFINITY), -7.0);
    }

    #[test]
    fn test_external_stays_inside_bounds() {
        // Whatever the solver does in internal coordinates, the external
        // value never leaves [min, max]
        for i in -100..=100 {
            let int = i as f64 * 0.37;

            let ext = to_external(int, -2.0, 3.0);
            assert!((-2.0..=3.0).contains(&ext));

            let ext = to_external(int, 0.5, f64::INFINITY);
            assert!(ext >= 0.5);

            let ext = to_external(int, f64::NEG_INFINITY, -0.5);
            assert!(ext <= -0.5);
        }
    }
}
