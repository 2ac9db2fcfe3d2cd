//! Rational transfer functions in the Laplace variable
//!
//! A `RationalTf` stores real numerator and denominator coefficients in
//! descending powers of `s` and evaluates the frequency response with
//! Horner's scheme at `s = jω`.

use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::constants::NEAR_ZERO;
use crate::error::FitError;
use crate::math::conversions::{complex_2_magnitude, complex_2_radian, unwrap_radians};

/// A rational transfer function `H(s) = num(s) / den(s)`
///
/// Coefficients are in descending powers of `s`, so
/// `RationalTf::new(vec![1.0], vec![1.0, 1.0])` is `1 / (s + 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RationalTf {
    num: Vec<f64>,
    den: Vec<f64>,
}

impl RationalTf {
    /// Create a new transfer function from coefficient vectors
    ///
    /// # Errors
    /// Fails if either vector is empty or the denominator is zero everywhere.
    pub fn new(num: Vec<f64>, den: Vec<f64>) -> Result<Self, FitError> {
        if num.is_empty() || den.is_empty() {
            return Err(FitError::InvalidTf(
                "coefficient vectors must be non-empty".to_string(),
            ));
        }
        if den.iter().all(|c| c.abs() < NEAR_ZERO) {
            return Err(FitError::InvalidTf("denominator is zero".to_string()));
        }
        Ok(Self { num, den })
    }

    /// Create a constant system `H(s) = k`
    pub fn constant(k: f64) -> Self {
        Self {
            num: vec![k],
            den: vec![1.0],
        }
    }

    /// Get the numerator coefficients, descending powers of `s`
    #[inline]
    pub fn num(&self) -> &[f64] {
        &self.num
    }

    /// Get the denominator coefficients, descending powers of `s`
    #[inline]
    pub fn den(&self) -> &[f64] {
        &self.den
    }

    /// Evaluate the transfer function at a complex frequency point
    pub fn eval(&self, s: Complex64) -> Complex64 {
        horner(&self.num, s) / horner(&self.den, s)
    }

    /// Evaluate the frequency response over a vector of frequencies in Hz
    ///
    /// Uses `s = j·2π·f`.
    pub fn response_hz(&self, freqs_hz: &[f64]) -> Array1<Complex64> {
        freqs_hz
            .iter()
            .map(|&f| self.eval(Complex64::new(0.0, 2.0 * PI * f)))
            .collect()
    }

    /// Sample the Bode response over an angular-frequency sweep in rad/s
    ///
    /// Returns `(magnitude, phase)` with magnitude as a linear ratio and
    /// phase in radians, unwrapped so curves cross ±180° without jumps.
    pub fn bode(&self, omega: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let response: Vec<Complex64> = omega
            .iter()
            .map(|&w| self.eval(Complex64::new(0.0, w)))
            .collect();
        let mag = response.iter().map(|&z| complex_2_magnitude(z)).collect();
        let phase: Vec<f64> = response.iter().map(|&z| complex_2_radian(z)).collect();
        (mag, unwrap_radians(&phase))
    }
}

/// Evaluate a polynomial with descending coefficients at `s`
fn horner(coeffs: &[f64], s: Complex64) -> Complex64 {
    let mut acc = Complex64::new(0.0, 0.0);
    for &c in coeffs {
        acc = acc * s + c;
    }
    acc
}
