//! Optional remote fitting delegate.
//!
//! When `STEPWEAVE_WOLFRAM_URL` points at a remote fit endpoint, requests
//! that ask for it are forwarded there. The delegate is strictly best-effort:
//! every transport error, non-200 status, parse failure, or wrong-shape
//! reply is reported as an error to the caller, which falls back to the
//! local fitter. Nothing is retried.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use serde::Deserialize;
use stepweave_curve::{FitMethod, FitSeries};
use thiserror::Error;

/// Environment variable holding the remote fit endpoint URL.
pub const WOLFRAM_URL_ENV: &str = "STEPWEAVE_WOLFRAM_URL";

/// Timeout for connect, read, and write on the delegate call.
const DELEGATE_TIMEOUT: Duration = Duration::from_secs(3);

/// Error type for delegate calls. Callers treat every variant the same way
/// (warn and fall back); the variants exist for the log line.
#[derive(Debug, Error)]
pub enum DelegateError {
    /// No endpoint configured.
    #[error("no delegate endpoint configured")]
    Unconfigured,

    /// The configured URL could not be parsed.
    #[error("bad delegate url: {0}")]
    BadUrl(String),

    /// Transport-level failure.
    #[error("delegate I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The delegate answered, but not with a usable payload.
    #[error("bad delegate response: {0}")]
    BadResponse(String),
}

/// Expected reply shape from the remote fitter.
#[derive(Debug, Deserialize)]
struct DelegateReply {
    values: Vec<f64>,
}

/// Handle to the (possibly absent) remote fitter.
#[derive(Debug, Clone, Default)]
pub struct WolframDelegate {
    url: Option<String>,
}

impl WolframDelegate {
    /// Build from an explicit URL (empty means absent).
    pub fn new(url: Option<String>) -> Self {
        Self {
            url: url.filter(|u| !u.is_empty()),
        }
    }

    /// Build from `STEPWEAVE_WOLFRAM_URL`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(WOLFRAM_URL_ENV).ok())
    }

    /// Whether an endpoint is configured. This alone determines the
    /// availability reported by `/api/wolfram/status`.
    pub fn available(&self) -> bool {
        self.url.is_some()
    }

    /// Host portion for status reporting (empty when unconfigured).
    pub fn host(&self) -> String {
        self.url
            .as_deref()
            .and_then(|url| split_url(url).ok())
            .map(|(host, port, _)| format!("{host}:{port}"))
            .unwrap_or_default()
    }

    /// Ask the remote fitter for `length` values.
    ///
    /// Accepts only a 200 reply whose body parses as `{ "values": [...] }`
    /// with exactly `length` finite entries. Anything else is an error the
    /// caller recovers from locally.
    pub fn fit(
        &self,
        series: &FitSeries,
        length: usize,
        method: FitMethod,
        degree: i64,
        smoothing: f64,
    ) -> Result<Vec<f64>, DelegateError> {
        let url = self.url.as_deref().ok_or(DelegateError::Unconfigured)?;
        let (host, port, path) = split_url(url).map_err(DelegateError::BadUrl)?;

        let payload = serde_json::json!({
            "x": series.x,
            "y": series.y,
            "length": length,
            "method": method.name(),
            "degree": degree,
            "smoothing": smoothing,
        })
        .to_string();

        let body = post_json(&host, port, &path, &payload)?;

        let reply: DelegateReply = serde_json::from_slice(&body)
            .map_err(|e| DelegateError::BadResponse(format!("parse failed: {e}")))?;

        if reply.values.len() != length {
            return Err(DelegateError::BadResponse(format!(
                "expected {length} values, got {}",
                reply.values.len()
            )));
        }
        if reply.values.iter().any(|v| !v.is_finite()) {
            return Err(DelegateError::BadResponse(
                "non-finite value in reply".to_string(),
            ));
        }

        Ok(reply.values.iter().map(|v| v.clamp(0.0, 1.0)).collect())
    }
}

/// Split an `http://host[:port]/path` URL. TLS is out of scope for a
/// LAN-local delegate, so other schemes are rejected.
fn split_url(url: &str) -> Result<(String, u16, String), String> {
    let rest = url
        .strip_prefix("http://")
        .ok_or_else(|| format!("only http:// URLs are supported: {url}"))?;

    let (authority, path) = match rest.find('/') {
        Some(index) => (&rest[..index], rest[index..].to_string()),
        None => (rest, "/".to_string()),
    };
    if authority.is_empty() {
        return Err(format!("missing host: {url}"));
    }

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => {
            let port: u16 = port.parse().map_err(|_| format!("bad port: {url}"))?;
            (host.to_string(), port)
        }
        None => (authority.to_string(), 80),
    };
    if host.is_empty() {
        return Err(format!("missing host: {url}"));
    }

    Ok((host, port, path))
}

/// One-shot HTTP POST with a JSON body; returns the response body after
/// verifying a 200 status line.
fn post_json(host: &str, port: u16, path: &str, payload: &str) -> Result<Vec<u8>, DelegateError> {
    let addr = (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| DelegateError::BadUrl(format!("unresolvable host: {host}")))?;

    let mut stream = TcpStream::connect_timeout(&addr, DELEGATE_TIMEOUT)?;
    stream.set_read_timeout(Some(DELEGATE_TIMEOUT))?;
    stream.set_write_timeout(Some(DELEGATE_TIMEOUT))?;

    write!(
        stream,
        "POST {path} HTTP/1.1\r\nHost: {host}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    )?;

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw)?;

    let header_end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| DelegateError::BadResponse("no header terminator".to_string()))?;

    let head = String::from_utf8_lossy(&raw[..header_end]);
    let status_line = head.lines().next().unwrap_or_default();
    let status_ok = status_line
        .split_whitespace()
        .nth(1)
        .is_some_and(|code| code == "200");
    if !status_ok {
        return Err(DelegateError::BadResponse(format!(
            "status line: {status_line}"
        )));
    }

    Ok(raw[header_end + 4..].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_delegate() {
        let delegate = WolframDelegate::new(None);
        assert!(!delegate.available());
        assert_eq!(delegate.host(), "");

        let series = FitSeries::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        let result = delegate.fit(&series, 4, FitMethod::Polynomial, 3, 0.0);
        assert!(matches!(result, Err(DelegateError::Unconfigured)));
    }

    #[test]
    fn test_empty_url_is_unconfigured() {
        let delegate = WolframDelegate::new(Some(String::new()));
        assert!(!delegate.available());
    }

    #[test]
    fn test_split_url() {
        assert_eq!(
            split_url("http://fit.local:9000/api/fit"),
            Ok(("fit.local".to_string(), 9000, "/api/fit".to_string()))
        );
        assert_eq!(
            split_url("http://fit.local"),
            Ok(("fit.local".to_string(), 80, "/".to_string()))
        );
        assert!(split_url("https://fit.local/api").is_err());
        assert!(split_url("http://:9000/x").is_err());
        assert!(split_url("http://fit.local:banana/x").is_err());
    }

    #[test]
    fn test_host_reporting() {
        let delegate = WolframDelegate::new(Some("http://fit.local:9000/api/fit".to_string()));
        assert!(delegate.available());
        assert_eq!(delegate.host(), "fit.local:9000");
    }

    #[test]
    fn test_unreachable_delegate_errors() {
        // Reserved port on localhost with nothing listening.
        let delegate = WolframDelegate::new(Some("http://127.0.0.1:1/api/fit".to_string()));
        let series = FitSeries::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        let result = delegate.fit(&series, 4, FitMethod::Polynomial, 3, 0.0);
        assert!(result.is_err());
    }
}
