//! Error types for data construction, model declaration, and fitting

use thiserror::Error;

/// Errors raised while building Bode data, declaring models, or fitting
#[derive(Error, Debug)]
pub enum FitError {
    #[error("length mismatch: expected {expected} points, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("empty data: at least one frequency point is required")]
    EmptyData,

    #[error("non-finite frequency at index {index}")]
    NonFiniteFrequency { index: usize },

    #[error("invalid parameter '{name}': {message}")]
    InvalidParam { name: String, message: String },

    #[error("parameter value count mismatch: model declares {expected}, got {got}")]
    ValueCount { expected: usize, got: usize },

    #[error("invalid transfer function: {0}")]
    InvalidTf(String),

    #[error("solver failed: {0}")]
    Solver(String),
}
