//! Unit conversion functions
//!
//! Provides conversions between magnitude/phase and complex representations
//! of a frequency response, plus degree/radian helpers and phase unwrapping.

use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::FitError;

/// Convert complex number to magnitude
pub fn complex_2_magnitude(z: Complex64) -> f64 {
    z.norm()
}

/// Convert complex number to phase in radians
pub fn complex_2_radian(z: Complex64) -> f64 {
    z.arg()
}

/// Convert complex number to phase in degrees
pub fn complex_2_degree(z: Complex64) -> f64 {
    z.arg() * 180.0 / PI
}

/// Convert radians to degrees
pub fn radian_2_degree(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Convert degrees to radians
pub fn degree_2_radian(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert (magnitude, degree) to complex
pub fn magdeg_2_complex(mag: f64, deg: f64) -> Complex64 {
    Complex64::from_polar(mag, degree_2_radian(deg))
}

/// Convert paired (magnitude, degree) vectors to a complex vector
///
/// # Errors
/// Fails if the two slices have different lengths.
pub fn magdeg_vec_2_complex(mag: &[f64], deg: &[f64]) -> Result<Array1<Complex64>, FitError> {
    if mag.len() != deg.len() {
        return Err(FitError::LengthMismatch {
            expected: mag.len(),
            got: deg.len(),
        });
    }
    Ok(mag
        .iter()
        .zip(deg.iter())
        .map(|(&m, &d)| magdeg_2_complex(m, d))
        .collect())
}

/// Unwrap a phase sequence in radians
///
/// Shifts each value by a multiple of 2π so that adjacent points differ by
/// at most π, removing the jumps of the principal branch.
pub fn unwrap_radians(phase: &[f64]) -> Vec<f64> {
    let two_pi = 2.0 * PI;
    let mut unwrapped = Vec::with_capacity(phase.len());
    let mut offset = 0.0;
    for (i, &p) in phase.iter().enumerate() {
        if i > 0 {
            let delta = p - phase[i - 1];
            offset -= two_pi * ((delta + PI) / two_pi).floor();
        }
        unwrapped.push(p + offset);
    }
    unwrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_complex_2_magnitude() {
        // 5 = |3 + 4j|
        let z = Complex64::new(3.0, 4.0);
        assert_relative_eq!(complex_2_magnitude(z), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_complex_2_degree() {
        // 90° = angle(0 + 1j)
        let z = Complex64::new(0.0, 1.0);
        assert_relative_eq!(complex_2_degree(z), 90.0, epsilon = 1e-10);
    }

    #[test]
    fn test_magdeg_2_complex_cardinals() {
        let z = magdeg_2_complex(1.0, 0.0);
        assert_relative_eq!(z.re, 1.0, epsilon = 1e-10);
        assert_relative_eq!(z.im, 0.0, epsilon = 1e-10);

        let z = magdeg_2_complex(1.0, 90.0);
        assert_relative_eq!(z.re, 0.0, epsilon = 1e-10);
        assert_relative_eq!(z.im, 1.0, epsilon = 1e-10);

        let z = magdeg_2_complex(2.0, 180.0);
        assert_relative_eq!(z.re, -2.0, epsilon = 1e-10);
        assert_relative_eq!(z.im, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_magdeg_2_complex_round_trip() {
        // Modulus and angle are recovered for arbitrary inputs
        for &(m, d) in &[(0.5, 12.0), (3.0, -77.0), (10.0, 145.0)] {
            let z = magdeg_2_complex(m, d);
            assert_relative_eq!(complex_2_magnitude(z), m, epsilon = 1e-10);
            assert_relative_eq!(complex_2_degree(z), d, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_magdeg_vec_2_complex() {
        let z = magdeg_vec_2_complex(&[1.0, 2.0], &[0.0, 90.0]).unwrap();
        assert_eq!(z.len(), 2);
        assert_relative_eq!(z[0].re, 1.0, epsilon = 1e-10);
        assert_relative_eq!(z[1].im, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_magdeg_vec_2_complex_length_mismatch() {
        let result = magdeg_vec_2_complex(&[1.0, 2.0], &[0.0]);
        assert!(matches!(
            result,
            Err(FitError::LengthMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_degree_radian_round_trip() {
        assert_relative_eq!(radian_2_degree(PI), 180.0, epsilon = 1e-10);
        assert_relative_eq!(degree_2_radian(180.0), PI, epsilon = 1e-10);
        assert_relative_eq!(degree_2_radian(radian_2_degree(1.234)), 1.234, epsilon = 1e-12);
    }

    #[test]
    fn test_unwrap_radians() {
        // A phase ramp that crosses the branch cut near ±π
        let wrapped = vec![-2.0, -2.9, 3.0, 2.2];
        let unwrapped = unwrap_radians(&wrapped);
        assert_relative_eq!(unwrapped[0], -2.0, epsilon = 1e-10);
        assert_relative_eq!(unwrapped[1], -2.9, epsilon = 1e-10);
        assert_relative_eq!(unwrapped[2], 3.0 - 2.0 * PI, epsilon = 1e-10);
        assert_relative_eq!(unwrapped[3], 2.2 - 2.0 * PI, epsilon = 1e-10);
        // Adjacent differences stay below π
        for w in unwrapped.windows(2) {
            assert!((w[1] - w[0]).abs() <= PI);
        }
    }

    #[test]
    fn test_unwrap_radians_no_jump() {
        let phase = vec![0.0, 0.5, 1.0, 1.5];
        assert_eq!(unwrap_radians(&phase), phase);
    }
}
