//! Request/response types and route dispatch.

use serde::{Deserialize, Serialize};
use serde_json::json;
use stepweave_curve::{fit_series, CurveError, FitMethod, FitSeries};

use crate::delegate::WolframDelegate;
use crate::http::{Request, Response};

/// Default output length when the request omits one.
const DEFAULT_LENGTH: usize = 16;

/// Default polynomial degree.
const DEFAULT_DEGREE: i64 = 3;

/// `data` accepts either a flattened `[x0, y0, x1, y1, ...]` array or an
/// array of `[x, y]` pairs. Only consulted when `x`/`y` are absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DataField {
    Pairs(Vec<[f64; 2]>),
    Flat(Vec<f64>),
}

/// Body of `POST /api/curves/fit`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FitRequest {
    pub x: Option<Vec<f64>>,
    pub y: Option<Vec<f64>>,
    pub data: Option<DataField>,
    pub length: usize,
    pub method: FitMethod,
    pub degree: i64,
    pub smoothing: f64,
    pub use_wolfram: bool,
}

impl Default for FitRequest {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            data: None,
            length: DEFAULT_LENGTH,
            method: FitMethod::Polynomial,
            degree: DEFAULT_DEGREE,
            smoothing: 0.0,
            use_wolfram: false,
        }
    }
}

impl FitRequest {
    /// Resolve the input series from `x`/`y` or, failing that, `data`.
    pub fn series(&self) -> Result<FitSeries, CurveError> {
        let series = match (&self.x, &self.y) {
            (Some(x), Some(y)) => FitSeries::new(x.clone(), y.clone()),
            _ => match &self.data {
                Some(DataField::Pairs(pairs)) => {
                    let x = pairs.iter().map(|p| p[0]).collect();
                    let y = pairs.iter().map(|p| p[1]).collect();
                    FitSeries::new(x, y)
                }
                Some(DataField::Flat(flat)) => {
                    let x = flat.iter().step_by(2).copied().collect();
                    let y = flat.iter().skip(1).step_by(2).copied().collect();
                    FitSeries::new(x, y)
                }
                None => {
                    return Err(CurveError::InvalidInput(
                        "missing x/y or data".to_string(),
                    ))
                }
            },
        };
        series.validate()?;
        Ok(series)
    }
}

/// Body of a successful fit response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResponse {
    pub source: &'static str,
    pub method: &'static str,
    pub values: Vec<f64>,
}

/// Dispatch one request to its route.
pub fn handle_request(request: &Request, delegate: &WolframDelegate) -> Response {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/api/curves/fit") => handle_fit(&request.body, delegate),
        ("GET", "/api/wolfram/status") => handle_status(delegate),
        _ => Response::json(404, &json!({ "error": "not found" })),
    }
}

/// `POST /api/curves/fit`.
fn handle_fit(body: &[u8], delegate: &WolframDelegate) -> Response {
    let fit: FitRequest = match serde_json::from_slice(body) {
        Ok(fit) => fit,
        Err(e) => {
            return Response::json(400, &json!({ "error": format!("invalid body: {e}") }));
        }
    };

    let series = match fit.series() {
        Ok(series) => series,
        Err(e) => return Response::json(400, &json!({ "error": e.to_string() })),
    };

    let (values, source) = fit_with_fallback(&fit, &series, delegate);
    match values {
        Ok(values) => Response::json(
            200,
            &serde_json::to_value(FitResponse {
                source,
                method: fit.method.name(),
                values,
            })
            .expect("fit response serializes"),
        ),
        Err(e) => Response::json(
            500,
            &json!({ "error": "fit failed", "details": e.to_string() }),
        ),
    }
}

/// Try the remote delegate when asked for, fall back to the local fitter on
/// any failure. The fallback policy lives here and nowhere else.
fn fit_with_fallback(
    fit: &FitRequest,
    series: &FitSeries,
    delegate: &WolframDelegate,
) -> (Result<Vec<f64>, CurveError>, &'static str) {
    if fit.use_wolfram && delegate.available() {
        match delegate.fit(series, fit.length, fit.method, fit.degree, fit.smoothing) {
            Ok(values) => return (Ok(values), "wolfram"),
            Err(e) => {
                eprintln!("warning: wolfram delegate failed, using local fit: {e}");
            }
        }
    }

    (
        fit_series(series, fit.length, fit.method, fit.degree, fit.smoothing),
        "local",
    )
}

/// `GET /api/wolfram/status`.
fn handle_status(delegate: &WolframDelegate) -> Response {
    Response::json(
        200,
        &json!({
            "available": delegate.available(),
            "host": delegate.host(),
        }),
    )
}
