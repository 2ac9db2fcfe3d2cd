//! Numerical constants for fitting and plotting
//!
//! Provides the sweep limits used by the overlay plotter, the default
//! solver settings, and the tolerances shared across the library.

/// Tolerance for detecting near-zero values in singularity checks.
/// Used to reject denominators that are zero everywhere.
pub const NEAR_ZERO: f64 = 1e-15;

/// Relative step for the forward-difference Jacobian. The square root of
/// the f64 machine epsilon, the MINPACK convention.
pub const FD_REL_STEP: f64 = 1.4901161193847656e-8;

/// Default solver patience. The Levenberg-Marquardt evaluation budget is
/// `patience * (n_params + 1)` residual evaluations.
pub const DEFAULT_PATIENCE: usize = 100;

/// Default relative tolerance on the reduction of the residual sum of squares.
pub const DEFAULT_FTOL: f64 = 1e-10;

/// Default relative tolerance on the change of the parameter vector.
pub const DEFAULT_XTOL: f64 = 1e-10;

/// Lower edge of the overlay curve sweep, in rad/s.
pub const OMEGA_SWEEP_START: f64 = 0.1;

/// Upper edge of the overlay curve sweep, in rad/s.
pub const OMEGA_SWEEP_STOP: f64 = 1000.0;

/// Number of points sampled per overlay curve.
pub const OMEGA_SWEEP_POINTS: usize = 400;

/// Margin added to each end of the overlay sweep, in decades.
pub const OMEGA_MARGIN_DECADES: f64 = 0.5;
