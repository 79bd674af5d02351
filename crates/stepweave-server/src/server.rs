//! TCP accept loop.
//!
//! Architecture: a listener thread accepts connections and hands each one to
//! its own short-lived worker thread (connections are one-shot, see
//! `http.rs`). A shared `keep_running` flag, checked between non-blocking
//! accepts, lets [`ServerHandle::stop`] shut the loop down cleanly so tests
//! can start and stop the service on an OS-assigned port.

use std::io::BufReader;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::delegate::WolframDelegate;
use crate::http::{read_request, write_response, Response};
use crate::routes::handle_request;

/// Configuration for starting the fit service.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Listen port; 0 lets the OS pick one.
    pub port: u16,
    /// Remote fit endpoint; `None` reads `STEPWEAVE_WOLFRAM_URL`.
    pub wolfram_url: Option<String>,
}

/// Handle returned by [`start_server`] to control the running service.
pub struct ServerHandle {
    keep_running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ServerHandle {
    /// Signal the accept loop to stop and wait for it to shut down.
    pub fn stop(mut self) {
        self.keep_running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Start the service on a background thread. Returns a handle for stopping
/// it and the actual bound address (useful when port 0 is used).
pub fn start_server(config: ServerConfig) -> std::io::Result<(ServerHandle, SocketAddr)> {
    let listener = TcpListener::bind(("127.0.0.1", config.port))?;
    let addr = listener.local_addr()?;

    let delegate = match config.wolfram_url {
        Some(url) => WolframDelegate::new(Some(url)),
        None => WolframDelegate::from_env(),
    };

    let keep_running = Arc::new(AtomicBool::new(true));
    let keep_running_accept = keep_running.clone();

    let thread = thread::spawn(move || {
        accept_loop(listener, delegate, keep_running_accept);
    });

    Ok((
        ServerHandle {
            keep_running,
            thread: Some(thread),
        },
        addr,
    ))
}

/// Accept connections until `keep_running` goes false.
fn accept_loop(listener: TcpListener, delegate: WolframDelegate, keep_running: Arc<AtomicBool>) {
    // Non-blocking accept so the loop can check keep_running periodically.
    listener.set_nonblocking(true).ok();

    while keep_running.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, _addr)) => {
                stream.set_nonblocking(false).ok();
                let delegate = delegate.clone();
                thread::spawn(move || {
                    serve_connection(stream, &delegate);
                });
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(20));
            }
            Err(_) => break,
        }
    }
}

/// Serve one request on one connection, then close it.
fn serve_connection(stream: TcpStream, delegate: &WolframDelegate) {
    stream
        .set_read_timeout(Some(Duration::from_secs(10)))
        .ok();

    let mut reader = BufReader::new(match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return,
    });

    let response = match read_request(&mut reader) {
        Ok(Some(request)) => handle_request(&request, delegate),
        Ok(None) => return,
        Err(e) => Response::json(
            400,
            &serde_json::json!({ "error": format!("bad request: {e}") }),
        ),
    };

    // Peer going away mid-response is not our problem.
    let mut writer = stream;
    let _ = write_response(&mut writer, &response);
}
