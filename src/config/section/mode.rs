//! `[mode]` section configuration.
//!
//! ```toml
//! [mode]
//! policy = "environment"   # Or "marker" (default)
//! env_var = "APP_ENV"      # Read under the environment policy
//! ```

use crate::{config::ConfigDiagnostics, core::ModePolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    pub policy: ModePolicy,

    /// Environment variable consulted under [`ModePolicy::Environment`].
    pub env_var: String,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            policy: ModePolicy::default(),
            env_var: "NODE_ENV".into(),
        }
    }
}

impl ModeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.policy == ModePolicy::Environment && self.env_var.trim().is_empty() {
            diag.error("mode.env_var", "must name a variable under the environment policy");
        }
    }
}
