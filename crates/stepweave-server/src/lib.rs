//! stepweave curve-fit HTTP service.
//!
//! A small synchronous JSON service around `stepweave-curve`:
//!
//! - `POST /api/curves/fit`: fit or resample an (x, y) series to a
//!   fixed-length lane of values in [0, 1].
//! - `GET /api/wolfram/status`: whether a remote fitting delegate is
//!   configured.
//!
//! The server is a plain `TcpListener` accept loop with one thread per
//! connection and a hand-rolled HTTP/1.1 codec serving exactly these two
//! routes. Remote delegation is optional: when `STEPWEAVE_WOLFRAM_URL` is
//! set and a request asks for it, the series is forwarded there, and any
//! failure or malformed reply falls back to the local computation with a
//! logged warning.

pub mod delegate;
pub mod http;
pub mod routes;
pub mod server;

pub use delegate::WolframDelegate;
pub use routes::{handle_request, FitRequest, FitResponse};
pub use server::{start_server, ServerConfig, ServerHandle};

/// Crate version for frontend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
