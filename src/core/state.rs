//! Process state for serve mode.
//!
//! - `SHUTDOWN`: Has shutdown been requested? (signal received)
//! - `SERVER`: The running HTTP server, unblocked on shutdown

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tiny_http::Server;

use crate::hot::{CleanupOutcome, MarkerCleanup, install_signal_handler};

/// Shutdown has been requested (SIGINT/SIGTERM/SIGHUP received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// HTTP server reference for graceful shutdown
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Setup the termination handler. Call once, before the hot file is written.
///
/// The hot file is removed first, whatever happens next:
/// - After `register_server()`: the server is unblocked and the request loop ends
/// - Before: the process exits immediately
pub fn setup_shutdown_handler(cleanup: Arc<MarkerCleanup>) -> anyhow::Result<()> {
    install_signal_handler(cleanup, on_shutdown)
        .map_err(|e| anyhow::anyhow!("failed to set termination handler: {}", e))
}

fn on_shutdown(outcome: CleanupOutcome) {
    SHUTDOWN.store(true, Ordering::SeqCst);
    crate::debug!("hot"; "cleanup on signal: {:?}", outcome);

    if let Some(server) = SERVER.get() {
        crate::log!("serve"; "shutting down...");
        server.unblock();
    } else {
        std::process::exit(0);
    }
}

/// Register the HTTP server for graceful shutdown
///
/// Call this after binding the server, before entering the request loop
pub fn register_server(server: Arc<Server>) {
    let _ = SERVER.set(server);
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
