//! Server lifecycle management.

use crate::{core, hot::MarkerCleanup, log};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
///
/// Port `0` asks the OS for a free port and is never retried.
pub fn bind_with_retry(
    interface: std::net::IpAddr,
    base_port: u16,
) -> Result<(Server, SocketAddr)> {
    let attempts = if base_port == 0 { 1 } else { MAX_PORT_RETRIES };

    let mut offset = 0;
    loop {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                // the OS-assigned port is only known after binding
                let bound = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, bound));
            }
            Err(_) if offset + 1 < attempts => offset += 1,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    attempts,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
}

/// Register the server and the hot file cleanup with the signal handler.
///
/// A termination signal removes the hot file, then unblocks the server so
/// the request loop returns.
pub fn register_for_shutdown(server: Arc<Server>, cleanup: Arc<MarkerCleanup>) -> Result<()> {
    core::register_server(server);
    core::setup_shutdown_handler(cleanup)
}
