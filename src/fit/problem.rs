//! Least-squares problem adapter for the solver
//!
//! Bridges a `TransferModel` and measured data into the
//! `levenberg_marquardt::LeastSquaresProblem` contract. Complex residuals
//! are stacked as a real vector (all real parts, then all imaginary parts)
//! and the Jacobian is a forward difference over the internal coordinates.

use levenberg_marquardt::LeastSquaresProblem;
use nalgebra::storage::Owned;
use nalgebra::{DMatrix, DVector, Dyn};
use ndarray::Array1;
use num_complex::Complex64;

use super::bounds;
use crate::constants::FD_REL_STEP;
use crate::tf::{ParamSpec, TransferModel};

pub(crate) struct BodeProblem<'a, M: TransferModel> {
    model: &'a M,
    params: &'a [ParamSpec],
    freqs_hz: &'a [f64],
    z_meas: &'a Array1<Complex64>,
    /// Current parameter vector, internal (unbounded) coordinates
    x: DVector<f64>,
}

impl<'a, M: TransferModel> BodeProblem<'a, M> {
    pub(crate) fn new(
        model: &'a M,
        params: &'a [ParamSpec],
        freqs_hz: &'a [f64],
        z_meas: &'a Array1<Complex64>,
    ) -> Self {
        let x = DVector::from_iterator(
            params.len(),
            params
                .iter()
                .map(|p| bounds::to_internal(p.init, p.min, p.max)),
        );
        Self {
            model,
            params,
            freqs_hz,
            z_meas,
            x,
        }
    }

    /// External (bounded) parameter values at the current coordinates
    pub(crate) fn external_values(&self) -> Vec<f64> {
        self.external_at(&self.x)
    }

    fn external_at(&self, x: &DVector<f64>) -> Vec<f64> {
        self.params
            .iter()
            .zip(x.iter())
            .map(|(p, &xi)| bounds::to_external(xi, p.min, p.max))
            .collect()
    }

    /// Stacked residual vector at the given internal coordinates
    ///
    /// `None` tells the solver to back off: the model could not be built
    /// or produced a non-finite response.
    fn residuals_at(&self, x: &DVector<f64>) -> Option<DVector<f64>> {
        let values = self.external_at(x);
        let tf = self.model.tf(&values).ok()?;
        let response = tf.response_hz(self.freqs_hz);

        let n = self.freqs_hz.len();
        let mut stacked = DVector::<f64>::zeros(2 * n);
        for i in 0..n {
            let r = response[i] - self.z_meas[i];
            if !r.re.is_finite() || !r.im.is_finite() {
                return None;
            }
            stacked[i] = r.re;
            stacked[n + i] = r.im;
        }
        Some(stacked)
    }
}

impl<'a, M: TransferModel> LeastSquaresProblem<f64, Dyn, Dyn> for BodeProblem<'a, M> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, Dyn>;
    type ParameterStorage = Owned<f64, Dyn>;

    fn set_params(&mut self, x: &DVector<f64>) {
        self.x.copy_from(x);
    }

    fn params(&self) -> DVector<f64> {
        self.x.clone()
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        self.residuals_at(&self.x)
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        let base = self.residuals_at(&self.x)?;
        let m = base.len();
        let n = self.x.len();

        let mut jac = DMatrix::<f64>::zeros(m, n);
        let mut x_step = self.x.clone();
        for j in 0..n {
            let mut h = FD_REL_STEP * self.x[j].abs();
            if h == 0.0 {
                h = FD_REL_STEP;
            }
            x_step[j] = self.x[j] + h;
            let stepped = self.residuals_at(&x_step)?;
            x_step[j] = self.x[j];

            for i in 0..m {
                jac[(i, j)] = (stepped[i] - base[i]) / h;
            }
        }
        Some(jac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FitError;
    use crate::tf::{FnModel, RationalTf};
    use approx::assert_relative_eq;

    fn gain_model() -> FnModel<impl Fn(&[f64]) -> Result<RationalTf, FitError>> {
        FnModel::new(vec![ParamSpec::new("a", 1.0)], |v| {
            Ok(RationalTf::constant(v[0]))
        })
    }

    #[test]
    fn test_residuals_are_stacked_re_then_im() {
        let freqs = vec![1.0, 2.0, 3.0];
        let z = Array1::from_elem(3, Complex64::new(0.25, -0.5));
        let model = gain_model();
        let params = model.params();
        let problem = BodeProblem::new(&model, &params, &freqs, &z);

        // H(a=1) = 1 everywhere: residual re = 1 - 0.25, im = 0 + 0.5
        let r = problem.residuals().unwrap();
        assert_eq!(r.len(), 6);
        for i in 0..3 {
            assert_relative_eq!(r[i], 0.75, epsilon = 1e-12);
            assert_relative_eq!(r[3 + i], 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_jacobian_matches_analytic() {
        // H(a, b) = (a·s + b)/(s + 1) is linear in both parameters, so the
        // Jacobian columns are the stacked responses of s/(s+1) and 1/(s+1)
        let freqs = vec![0.5, 1.0, 2.0];
        let z = Array1::from_elem(3, Complex64::new(0.0, 0.0));
        let model = FnModel::new(
            vec![ParamSpec::new("a", 0.7), ParamSpec::new("b", -0.3)],
            |v| RationalTf::new(vec![v[0], v[1]], vec![1.0, 1.0]),
        );
        let params = model.params();
        let problem = BodeProblem::new(&model, &params, &freqs, &z);

        let jac = problem.jacobian().unwrap();
        assert_eq!(jac.shape(), (6, 2));

        let da = RationalTf::new(vec![1.0, 0.0], vec![1.0, 1.0])
            .unwrap()
            .response_hz(&freqs);
        let db = RationalTf::new(vec![1.0], vec![1.0, 1.0])
            .unwrap()
            .response_hz(&freqs);
        for i in 0..3 {
            assert_relative_eq!(jac[(i, 0)], da[i].re, epsilon = 1e-6);
            assert_relative_eq!(jac[(3 + i, 0)], da[i].im, epsilon = 1e-6);
            assert_relative_eq!(jac[(i, 1)], db[i].re, epsilon = 1e-6);
            assert_relative_eq!(jac[(3 + i, 1)], db[i].im, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_bounded_params_start_at_declared_init() {
        let freqs = vec![1.0];
        let z = Array1::from_elem(1, Complex64::new(1.0, 0.0));
        let model = FnModel::new(vec![ParamSpec::new("k", 2.0).with_bounds(1.0, 4.0)], |v| {
            Ok(RationalTf::constant(v[0]))
        });
        let params = model.params();
        let problem = BodeProblem::new(&model, &params, &freqs, &z);

        let values = problem.external_values();
        assert_relative_eq!(values[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_response_yields_none() {
        // H(s) = k/s is singular at s = 0
        let freqs = vec![0.0];
        let z = Array1::from_elem(1, Complex64::new(1.0, 0.0));
        let model = FnModel::new(vec![ParamSpec::new("k", 1.0)], |v| {
            RationalTf::new(vec![v[0]], vec![1.0, 0.0])
        });
        let params = model.params();
        let problem = BodeProblem::new(&model, &params, &freqs, &z);

        assert!(problem.residuals().is_none());
        assert!(problem.jacobian().is_none());
    }
}
