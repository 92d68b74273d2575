//! `[serve]` section configuration.
//!
//! Contains development server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! root = "resources"          # Directory served as-is
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 5173                 # HTTP port number (0 = pick a free one)
//! https = false               # Advertise an https URL in the hot file
//! host = "dev.example.test"   # Advertised host (default: bound address)
//!
//! [serve.hmr]
//! protocol = "wss"            # "wss" forces an https URL
//! host = "hmr.example.test"   # Takes precedence over `host`
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.

use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

use crate::hot::DevServerOptions;

/// Development server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Directory whose files are served.
    pub root: PathBuf,

    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    pub https: bool,

    pub host: Option<String>,

    pub hmr: HmrConfig,
}

/// `[serve.hmr]`: overrides for the advertised URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HmrConfig {
    pub protocol: Option<String>,
    pub host: Option<String>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            root: "resources".into(),
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5173,
            https: false,
            host: None,
            hmr: HmrConfig::default(),
        }
    }
}

impl ServeConfig {
    /// Options for computing the URL written to the hot file.
    pub fn dev_server_options(&self) -> DevServerOptions {
        DevServerOptions {
            https: self.https,
            host: self.host.clone(),
            hmr_protocol: self.hmr.protocol.clone(),
            hmr_host: self.hmr.host.clone(),
        }
    }
}
