//! Error types for curve fitting.

use thiserror::Error;

/// Error type for curve fitting operations.
///
/// Only malformed input arrays are errors; numeric parameters out of range
/// (degree, window, sigma) are clamped by the callee and near-singular
/// systems are regularized instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// Missing, empty, or mismatched input series.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
