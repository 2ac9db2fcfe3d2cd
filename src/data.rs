//! Measured Bode data container
//!
//! Holds a frequency band together with the measured complex response and
//! the magnitude/phase values it was entered as.

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::FitError;
use crate::frequency::Frequency;
use crate::math::conversions::{complex_2_degree, complex_2_magnitude, magdeg_vec_2_complex};

/// Measured frequency-response data for fitting and overlay plotting
///
/// Immutable once built. Constructors validate lengths and derive the
/// representation they were not given.
#[derive(Debug, Clone)]
pub struct BodeData {
    /// Frequency band
    frequency: Frequency,
    /// Measured complex response
    z: Array1<Complex64>,
    /// Magnitude of the response (linear ratio)
    mag: Vec<f64>,
    /// Phase of the response (degrees)
    phase_deg: Vec<f64>,
}

impl BodeData {
    /// Create from a frequency band and measured complex response
    pub fn new(frequency: Frequency, z: Array1<Complex64>) -> Result<Self, FitError> {
        Self::check_len(&frequency, z.len())?;
        let mag = z.iter().map(|&v| complex_2_magnitude(v)).collect();
        let phase_deg = z.iter().map(|&v| complex_2_degree(v)).collect();
        Ok(Self {
            frequency,
            z,
            mag,
            phase_deg,
        })
    }

    /// Create from measured (magnitude, phase in degrees) vectors
    ///
    /// This is the entry point for gain/phase tables read off an
    /// instrument; the complex response is derived element-wise.
    pub fn from_mag_phase(
        frequency: Frequency,
        mag: &[f64],
        phase_deg: &[f64],
    ) -> Result<Self, FitError> {
        Self::check_len(&frequency, mag.len())?;
        let z = magdeg_vec_2_complex(mag, phase_deg)?;
        Ok(Self {
            frequency,
            z,
            mag: mag.to_vec(),
            phase_deg: phase_deg.to_vec(),
        })
    }

    fn check_len(frequency: &Frequency, n: usize) -> Result<(), FitError> {
        if frequency.npoints() == 0 || n == 0 {
            return Err(FitError::EmptyData);
        }
        if frequency.npoints() != n {
            return Err(FitError::LengthMismatch {
                expected: frequency.npoints(),
                got: n,
            });
        }
        Ok(())
    }

    /// Get the frequency band
    #[inline]
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    /// Get the frequency vector in Hz
    #[inline]
    pub fn freqs_hz(&self) -> &[f64] {
        self.frequency.f()
    }

    /// Get the measured complex response
    #[inline]
    pub fn z(&self) -> &Array1<Complex64> {
        &self.z
    }

    /// Get the measured magnitude (linear ratio)
    #[inline]
    pub fn mag(&self) -> &[f64] {
        &self.mag
    }

    /// Get the measured phase in degrees
    #[inline]
    pub fn phase_deg(&self) -> &[f64] {
        &self.phase_deg
    }

    /// Get the number of measurement points
    #[inline]
    pub fn npoints(&self) -> usize {
        self.z.len()
    }
}
