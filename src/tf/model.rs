//! Parameter declarations and the fit-model contract
//!
//! A `TransferModel` declares its free parameters explicitly and builds a
//! concrete `RationalTf` from a value assignment. Every parameter carries
//! a name, a required initial value, and optional bounds.

use super::rational::RationalTf;
use crate::error::FitError;

/// Declaration of a single fit parameter
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Parameter name, used for reporting
    pub name: String,
    /// Initial value the fit starts from
    pub init: f64,
    /// Lower bound (defaults to -∞)
    pub min: f64,
    /// Upper bound (defaults to +∞)
    pub max: f64,
}

impl ParamSpec {
    /// Declare an unbounded parameter with the given initial value
    pub fn new(name: impl Into<String>, init: f64) -> Self {
        Self {
            name: name.into(),
            init,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Restrict the parameter to `[min, max]`
    ///
    /// Either end may be infinite for a one-sided bound.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

/// A transfer-function model with declared parameters
///
/// `tf` must accept exactly one value per declared parameter, in
/// declaration order.
pub trait TransferModel {
    /// The declared parameters, in reporting order
    fn params(&self) -> Vec<ParamSpec>;

    /// Build the transfer function for a parameter value assignment
    fn tf(&self, values: &[f64]) -> Result<RationalTf, FitError>;
}

/// A model defined by a closure over parameter values
///
/// # Example
/// ```
/// use bodefit::tf::{FnModel, ParamSpec, RationalTf};
///
/// // H(s) = k / (tau·s + 1)
/// let model = FnModel::new(
///     vec![ParamSpec::new("k", 1.0), ParamSpec::new("tau", 0.1)],
///     |v| RationalTf::new(vec![v[0]], vec![v[1], 1.0]),
/// );
/// ```
pub struct FnModel<F> {
    params: Vec<ParamSpec>,
    build: F,
}

impl<F> FnModel<F>
where
    F: Fn(&[f64]) -> Result<RationalTf, FitError>,
{
    /// Create a model from parameter declarations and a builder closure
    pub fn new(params: Vec<ParamSpec>, build: F) -> Self {
        Self { params, build }
    }
}

impl<F> TransferModel for FnModel<F>
where
    F: Fn(&[f64]) -> Result<RationalTf, FitError>,
{
    fn params(&self) -> Vec<ParamSpec> {
        self.params.clone()
    }

    fn tf(&self, values: &[f64]) -> Result<RationalTf, FitError> {
        if values.len() != self.params.len() {
            return Err(FitError::ValueCount {
                expected: self.params.len(),
                got: values.len(),
            });
        }
        (self.build)(values)
    }
}

/// A fixed system is a model with no free parameters
impl TransferModel for RationalTf {
    fn params(&self) -> Vec<ParamSpec> {
        Vec::new()
    }

    fn tf(&self, values: &[f64]) -> Result<RationalTf, FitError> {
        if !values.is_empty() {
            return Err(FitError::ValueCount {
                expected: 0,
                got: values.len(),
            });
        }
        Ok(self.clone())
    }
}
