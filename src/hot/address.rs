//! Externally visible dev server URL.

use std::net::SocketAddr;

/// Settings that change how the dev server is reached from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevServerOptions {
    /// The server speaks TLS (directly or behind a terminating proxy).
    pub https: bool,
    /// Host name override for the server.
    pub host: Option<String>,
    /// Protocol of the HMR channel (`ws` / `wss`).
    pub hmr_protocol: Option<String>,
    /// Host name override for the HMR channel.
    pub hmr_host: Option<String>,
}

/// Compute the base URL written to the hot file.
///
/// Protocol: HMR protocol override (`wss` means `https`), else the server's
/// TLS state. Host: HMR host, else server host, else the bound address with
/// IPv6 bracketed. The port is always the bound port.
pub fn resolve_dev_server_url(addr: SocketAddr, options: &DevServerOptions) -> String {
    let protocol = match non_empty(&options.hmr_protocol) {
        Some("wss") => "https",
        Some(_) => "http",
        None if options.https => "https",
        None => "http",
    };

    let host = non_empty(&options.hmr_host)
        .or_else(|| non_empty(&options.host))
        .map(str::to_string)
        .unwrap_or_else(|| match addr {
            SocketAddr::V4(v4) => v4.ip().to_string(),
            SocketAddr::V6(v6) => format!("[{}]", v6.ip()),
        });

    format!("{protocol}://{host}:{}", addr.port())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
