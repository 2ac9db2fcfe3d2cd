//! Transfer-function representation and model declarations
//!
//! Provides the rational transfer function used for response evaluation
//! and the `TransferModel` contract the fit adapter consumes.

pub mod model;
pub mod rational;

pub use model::{FnModel, ParamSpec, TransferModel};
pub use rational::RationalTf;
