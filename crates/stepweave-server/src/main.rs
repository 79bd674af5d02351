//! stepweave-server - curve-fit HTTP service binary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use stepweave_server::{start_server, ServerConfig};

/// stepweave curve-fit service
#[derive(Parser)]
#[command(name = "stepweave-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Listen port (0 lets the OS pick one)
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Remote fit endpoint URL (default: $STEPWEAVE_WOLFRAM_URL)
    #[arg(long)]
    wolfram_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (handle, addr) = start_server(ServerConfig {
        port: cli.port,
        wolfram_url: cli.wolfram_url,
    })?;

    println!("stepweave fit service listening on http://{addr}");
    println!("Press Ctrl+C to stop.");

    // The accept loop lives on a background thread. The service keeps no
    // on-disk state, so letting SIGINT/SIGTERM kill the process is a clean
    // shutdown; the flag only flips if that ever changes.
    let running = Arc::new(AtomicBool::new(true));
    while running.load(Ordering::SeqCst) {
        std::thread::sleep(std::time::Duration::from_millis(100));
    }

    println!("\nShutting down...");
    handle.stop();
    Ok(())
}
