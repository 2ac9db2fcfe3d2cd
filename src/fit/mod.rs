//! Bode-data fit adapter
//!
//! Wraps a `TransferModel` into a nonlinear least-squares problem over a
//! measured complex frequency response. The minimization itself is
//! delegated to the `levenberg-marquardt` crate; this module owns the
//! parameter snapshot, the validation, and the result bookkeeping.

mod bounds;
mod problem;

use std::time::Instant;

use levenberg_marquardt::LevenbergMarquardt;
use ndarray::Array1;
use num_complex::Complex64;

use crate::constants::{DEFAULT_FTOL, DEFAULT_PATIENCE, DEFAULT_XTOL};
use crate::data::BodeData;
use crate::error::FitError;
use crate::tf::{ParamSpec, TransferModel};
use problem::BodeProblem;

/// Result of a completed fit
#[derive(Debug, Clone)]
pub struct FitReport {
    /// Fitted `(name, value)` pairs in declaration order
    pub values: Vec<(String, f64)>,
    /// Residual sum of squares, `Σ |H(f_k) - z_k|²`
    pub sse: f64,
    /// Root-mean-square error, `√(sse / npoints)`
    pub rmse: f64,
    /// Number of residual evaluations spent by the solver
    pub n_evaluations: usize,
    /// How the fit ended: the solver termination reason, or
    /// `DirectEvaluation` for parameter-free models
    pub termination: String,
    /// Wall-clock time of the fit (in seconds)
    pub wall_clock_time: f64,
}

/// Least-squares fit of a transfer-function model to measured Bode data
///
/// Construction snapshots the model's parameter declarations and validates
/// them together with the data; `fit()` may then be called any number of
/// times. Every fit starts from the declared initial values, and each
/// successful fit overwrites the stored report.
pub struct BodeFit<M: TransferModel> {
    model: M,
    freqs_hz: Vec<f64>,
    z_meas: Array1<Complex64>,
    params: Vec<ParamSpec>,
    report: Option<FitReport>,
    values: Option<Vec<f64>>,
    /// Solver patience: the evaluation budget is `patience · (n_params + 1)`
    pub patience: usize,
    /// Relative tolerance on the reduction of the residual sum of squares
    pub ftol: f64,
    /// Relative tolerance on the change of the parameter vector
    pub xtol: f64,
}

impl<M: TransferModel> BodeFit<M> {
    /// Create a fit problem from a model and a measured response
    ///
    /// # Arguments
    /// * `model` - The parameterized transfer-function model
    /// * `freqs_hz` - Measurement frequencies in Hz
    /// * `z_meas` - Measured complex response, one value per frequency
    ///
    /// # Errors
    /// Fails on empty or mismatched data, non-finite frequencies, and
    /// malformed parameter declarations (duplicate or empty names,
    /// non-finite initial values, initial values outside their bounds).
    pub fn new(model: M, freqs_hz: Vec<f64>, z_meas: Array1<Complex64>) -> Result<Self, FitError> {
        if freqs_hz.is_empty() {
            return Err(FitError::EmptyData);
        }
        if z_meas.len() != freqs_hz.len() {
            return Err(FitError::LengthMismatch {
                expected: freqs_hz.len(),
                got: z_meas.len(),
            });
        }
        if let Some(index) = freqs_hz.iter().position(|f| !f.is_finite()) {
            return Err(FitError::NonFiniteFrequency { index });
        }

        let params = model.params();
        validate_params(&params)?;

        Ok(Self {
            model,
            freqs_hz,
            z_meas,
            params,
            report: None,
            values: None,
            patience: DEFAULT_PATIENCE,
            ftol: DEFAULT_FTOL,
            xtol: DEFAULT_XTOL,
        })
    }

    /// Create a fit problem directly from measured Bode data
    pub fn from_data(model: M, data: &BodeData) -> Result<Self, FitError> {
        Self::new(model, data.freqs_hz().to_vec(), data.z().clone())
    }

    /// The parameter declarations snapshotted at construction
    #[inline]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// The report of the last successful fit
    #[inline]
    pub fn report(&self) -> Option<&FitReport> {
        self.report.as_ref()
    }

    /// Fitted values of the last successful fit, in declaration order
    #[inline]
    pub fn values(&self) -> Option<&[f64]> {
        self.values.as_deref()
    }

    /// The wrapped model
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// RMS error of the last successful fit
    pub fn rms_error(&self) -> Option<f64> {
        self.report.as_ref().map(|r| r.rmse)
    }

    /// Evaluate the model response at the stored measurement frequencies
    pub fn model_response(&self, values: &[f64]) -> Result<Array1<Complex64>, FitError> {
        let tf = self.model.tf(values)?;
        Ok(tf.response_hz(&self.freqs_hz))
    }

    /// Fit the model to the measured response
    ///
    /// Runs the Levenberg-Marquardt minimization from the declared initial
    /// values and stores the resulting report. A model with no declared
    /// parameters skips the solver and reports the directly computed
    /// residual. On failure the previously stored report is left in place.
    pub fn fit(&mut self) -> Result<&FitReport, FitError> {
        let timer_start = Instant::now();

        let (values, n_evaluations, termination) = if self.params.is_empty() {
            (Vec::new(), 1, "DirectEvaluation".to_string())
        } else {
            let problem =
                BodeProblem::new(&self.model, &self.params, &self.freqs_hz, &self.z_meas);
            let solver = LevenbergMarquardt::new()
                .with_ftol(self.ftol)
                .with_xtol(self.xtol)
                .with_patience(self.patience);
            let (problem, minimization) = solver.minimize(problem);

            if !minimization.termination.was_successful() {
                return Err(FitError::Solver(format!("{:?}", minimization.termination)));
            }
            (
                problem.external_values(),
                minimization.number_of_evaluations,
                format!("{:?}", minimization.termination),
            )
        };

        let response = self.model_response(&values)?;
        let sse: f64 = response
            .iter()
            .zip(self.z_meas.iter())
            .map(|(m, z)| (m - z).norm_sqr())
            .sum();
        if !sse.is_finite() {
            return Err(FitError::Solver(
                "non-finite residual at solution".to_string(),
            ));
        }
        let rmse = (sse / self.freqs_hz.len() as f64).sqrt();

        let report = FitReport {
            values: self
                .params
                .iter()
                .map(|p| p.name.clone())
                .zip(values.iter().copied())
                .collect(),
            sse,
            rmse,
            n_evaluations,
            termination,
            wall_clock_time: timer_start.elapsed().as_secs_f64(),
        };
        self.values = Some(values);
        Ok(self.report.insert(report))
    }
}

/// Validate a parameter declaration list
fn validate_params(params: &[ParamSpec]) -> Result<(), FitError> {
    for (i, p) in params.iter().enumerate() {
        if p.name.is_empty() {
            return Err(FitError::InvalidParam {
                name: format!("#{}", i),
                message: "name must be non-empty".to_string(),
            });
        }
        if params[..i].iter().any(|q| q.name == p.name) {
            return Err(FitError::InvalidParam {
                name: p.name.clone(),
                message: "duplicate name".to_string(),
            });
        }
        if !p.init.is_finite() {
            return Err(FitError::InvalidParam {
                name: p.name.clone(),
                message: "initial value must be finite".to_string(),
            });
        }
        if p.min.is_nan() || p.max.is_nan() || p.min >= p.max {
            return Err(FitError::InvalidParam {
                name: p.name.clone(),
                message: "lower bound must be below upper bound".to_string(),
            });
        }
        if p.init < p.min || p.init > p.max {
            return Err(FitError::InvalidParam {
                name: p.name.clone(),
                message: "initial value must lie inside the bounds".to_string(),
            });
        }
    }
    Ok(())
}
