//! stepweave curve fitter.
//!
//! Fits or resamples an arbitrary (x, y) series to a fixed-length automation
//! lane with every value in [0, 1]:
//!
//! - [`fit_polynomial`]: ordinary least squares via normal equations and
//!   Gaussian elimination with partial pivoting.
//! - [`moving_average`] / [`gaussian_smooth`]: smoothing passes.
//! - [`resample_linear`] / [`linspace`]: length adaptation.
//! - [`fit_series`]: the full pipeline the service and CLI call: input
//!   conditioning, method dispatch, and min-max normalization of the output.
//!
//! All functions are pure and synchronous; invalid numeric parameters are
//! clamped rather than rejected, and the only errors are missing or
//! mismatched input arrays.

pub mod error;
pub mod fit;
pub mod resample;
pub mod series;
pub mod smooth;

pub use error::CurveError;
pub use fit::{fit_polynomial, Polynomial};
pub use resample::{linspace, normalize_unit, resample_linear};
pub use series::{fit_series, FitMethod, FitSeries};
pub use smooth::{gaussian_smooth, moving_average};

/// Crate version for frontend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
