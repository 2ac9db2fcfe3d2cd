//! bodefit: transfer-function fitting for measured Bode data
//!
//! Fits parametric rational transfer-function models to measured complex
//! frequency-response data and overlays the measurements against candidate
//! model curves on a pair of log-frequency panels.
//!
//! ## Modules
//!
//! - `frequency` - Frequency band representation
//! - `data` - Measured Bode data container
//! - `math` - Magnitude/phase conversions
//! - `tf` - Rational transfer functions and model declarations
//! - `fit` - Nonlinear least-squares fit adapter
//! - `plot` - SVG Bode overlay rendering

pub mod constants;
pub mod data;
pub mod error;
pub mod fit;
pub mod frequency;
pub mod math;
pub mod plot;
pub mod tf;

pub use data::BodeData;
pub use error::FitError;
pub use fit::{BodeFit, FitReport};
pub use frequency::Frequency;
pub use plot::{render_svg, save_svg, LineDash, OverlayStyle};
pub use tf::{FnModel, ParamSpec, RationalTf, TransferModel};
