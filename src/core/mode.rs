//! Serving mode resolution: development (live dev server) vs production
//! (built manifest).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment value that selects production under [`ModePolicy::Environment`].
pub const PRODUCTION_ENV_VALUE: &str = "production";

/// How assets are referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Tags point at the live dev server.
    Development,
    /// Tags point at built files listed in the manifest.
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Which signal decides the mode.
///
/// Exactly one policy applies per engine; the two signals are never
/// combined, so a single setup cannot observe a mode it did not intend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModePolicy {
    /// A present hot file always means development, whatever the environment says.
    #[default]
    Marker,
    /// The environment variable decides; `production` means production.
    Environment,
}

/// Decide the serving mode.
///
/// `env_value` is the value of the configured environment variable, if set.
pub fn resolve_mode(policy: ModePolicy, env_value: Option<&str>, marker_present: bool) -> Mode {
    match policy {
        ModePolicy::Marker if marker_present => Mode::Development,
        ModePolicy::Marker => Mode::Production,
        ModePolicy::Environment if env_value == Some(PRODUCTION_ENV_VALUE) => Mode::Production,
        ModePolicy::Environment => Mode::Development,
    }
}
