//! The full fit pipeline: validation, conditioning, method dispatch, and
//! output normalization.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::fit::fit_polynomial;
use crate::resample::{linspace, normalize_unit, resample_linear};
use crate::smooth::{gaussian_smooth, moving_average};

/// Fitting method selector. Wire names follow the service API
/// (`polynomial`, `movingAverage`, `gaussian`, `linear`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitMethod {
    #[default]
    Polynomial,
    MovingAverage,
    Gaussian,
    Linear,
}

impl FitMethod {
    /// The wire name of the method.
    pub fn name(&self) -> &'static str {
        match self {
            FitMethod::Polynomial => "polynomial",
            FitMethod::MovingAverage => "movingAverage",
            FitMethod::Gaussian => "gaussian",
            FitMethod::Linear => "linear",
        }
    }
}

impl FromStr for FitMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "polynomial" => Ok(FitMethod::Polynomial),
            "movingAverage" => Ok(FitMethod::MovingAverage),
            "gaussian" => Ok(FitMethod::Gaussian),
            "linear" => Ok(FitMethod::Linear),
            other => Err(format!("unknown fit method: {other}")),
        }
    }
}

/// An (x, y) input series. x need not be sorted or unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl FitSeries {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    /// Reject empty or mismatched arrays. These are the only client errors
    /// the fitter reports; everything else is clamped.
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.x.is_empty() || self.y.is_empty() {
            return Err(CurveError::InvalidInput(
                "x and y must be non-empty".to_string(),
            ));
        }
        if self.x.len() != self.y.len() {
            return Err(CurveError::InvalidInput(format!(
                "x and y lengths differ: {} vs {}",
                self.x.len(),
                self.y.len()
            )));
        }
        Ok(())
    }
}

/// Degree bounds for the polynomial method.
const MIN_DEGREE: i64 = 1;
const MAX_DEGREE: i64 = 8;

/// Fit or resample a series to `length` values, each in [0, 1].
///
/// The x axis is min-max normalized into [0, 1] before fitting for numeric
/// conditioning. `degree` is clamped to 1-8; `smoothing` is the window size
/// for the moving average (rounded, at least 1) and sigma for the Gaussian
/// (non-positive coerced to 1.0). Whatever the method produced is min-max
/// normalized into [0, 1] at the end; a constant result maps to all 0.5.
pub fn fit_series(
    series: &FitSeries,
    length: usize,
    method: FitMethod,
    degree: i64,
    smoothing: f64,
) -> Result<Vec<f64>, CurveError> {
    series.validate()?;

    let raw = match method {
        FitMethod::Polynomial => {
            let x_norm = normalize_unit(&series.x);
            let degree = degree.clamp(MIN_DEGREE, MAX_DEGREE) as usize;
            let poly = fit_polynomial(&x_norm, &series.y, degree)?;
            poly.sample(&linspace(0.0, 1.0, length))
        }
        FitMethod::MovingAverage => {
            let window = smoothing.round().max(1.0) as usize;
            resample_linear(&moving_average(&series.y, window), length)
        }
        FitMethod::Gaussian => {
            let sigma = if smoothing > 0.0 { smoothing } else { 1.0 };
            resample_linear(&gaussian_smooth(&series.y, sigma), length)
        }
        FitMethod::Linear => resample_linear(&series.y, length),
    };

    Ok(normalize_unit(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic_series() -> FitSeries {
        FitSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0, 9.0])
    }

    #[test]
    fn test_polynomial_fit_monotonic_convex() {
        let values = fit_series(&quadratic_series(), 5, FitMethod::Polynomial, 2, 0.0).unwrap();
        assert_eq!(values.len(), 5);
        for v in &values {
            assert!((0.0..=1.0).contains(v));
        }
        for pair in values.windows(2) {
            assert!(pair[1] >= pair[0], "not non-decreasing: {values:?}");
        }
    }

    #[test]
    fn test_polynomial_endpoints_span_unit() {
        // Output is always min-max normalized, so the extremes hit 0 and 1.
        let values = fit_series(&quadratic_series(), 9, FitMethod::Polynomial, 2, 0.0).unwrap();
        assert!(values[0].abs() < 1e-9);
        assert!((values[8] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_degree_clamped() {
        // Degree 50 clamps to 8 and still fits.
        let values = fit_series(&quadratic_series(), 8, FitMethod::Polynomial, 50, 0.0).unwrap();
        assert_eq!(values.len(), 8);
        assert!(values.iter().all(|v| v.is_finite()));

        // Degree 0 clamps to 1 (a line, not a constant).
        let values = fit_series(&quadratic_series(), 4, FitMethod::Polynomial, 0, 0.0).unwrap();
        assert!(values[3] > values[0]);
    }

    #[test]
    fn test_linear_method_resamples() {
        let series = FitSeries::new(vec![0.0, 1.0], vec![0.0, 10.0]);
        let values = fit_series(&series, 5, FitMethod::Linear, 3, 0.0).unwrap();
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_moving_average_method() {
        let series = FitSeries::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0],
        );
        let values = fit_series(&series, 6, FitMethod::MovingAverage, 3, 3.0).unwrap();
        assert_eq!(values.len(), 6);
        for v in &values {
            assert!((0.0..=1.0).contains(v));
        }
    }

    #[test]
    fn test_gaussian_method_zero_smoothing_coerced() {
        let series = FitSeries::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 1.0, 0.0, 1.0],
        );
        let values = fit_series(&series, 4, FitMethod::Gaussian, 3, 0.0).unwrap();
        assert_eq!(values.len(), 4);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_constant_input_all_half() {
        let series = FitSeries::new(vec![0.0, 1.0, 2.0], vec![4.0, 4.0, 4.0]);
        let values = fit_series(&series, 6, FitMethod::Linear, 3, 0.0).unwrap();
        assert_eq!(values, vec![0.5; 6]);
    }

    #[test]
    fn test_validation_errors() {
        let empty = FitSeries::new(vec![], vec![]);
        assert!(fit_series(&empty, 4, FitMethod::Linear, 3, 0.0).is_err());

        let mismatched = FitSeries::new(vec![0.0, 1.0], vec![1.0]);
        assert!(fit_series(&mismatched, 4, FitMethod::Linear, 3, 0.0).is_err());
    }

    #[test]
    fn test_unsorted_x_accepted() {
        let series = FitSeries::new(vec![3.0, 0.0, 2.0, 1.0], vec![9.0, 0.0, 4.0, 1.0]);
        let values = fit_series(&series, 5, FitMethod::Polynomial, 2, 0.0).unwrap();
        assert_eq!(values.len(), 5);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(FitMethod::Polynomial.name(), "polynomial");
        assert_eq!(FitMethod::MovingAverage.name(), "movingAverage");
        assert_eq!("movingAverage".parse::<FitMethod>(), Ok(FitMethod::MovingAverage));
        assert!("cubic".parse::<FitMethod>().is_err());
        assert_eq!(FitMethod::default(), FitMethod::Polynomial);
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&FitMethod::MovingAverage).unwrap();
        assert_eq!(json, "\"movingAverage\"");
        let method: FitMethod = serde_json::from_str("\"gaussian\"").unwrap();
        assert_eq!(method, FitMethod::Gaussian);
    }
}
