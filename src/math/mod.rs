//! Mathematical functions module
//!
//! Provides the magnitude/phase conversions used by the data container,
//! the Bode sampler, and the overlay plotter.

pub mod conversions;

pub use conversions::*;
