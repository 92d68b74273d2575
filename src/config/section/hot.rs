//! `[hot]` section configuration.
//!
//! ```toml
//! [hot]
//! file = "hot"                          # Relative to build.public
//! client = "@vite/client"
//! refresh_runtime = "@react-refresh"
//! fallback_url = "http://localhost:5173"
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Dev server handshake settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotConfig {
    /// Hot file name, relative to `build.public`.
    pub file: PathBuf,

    /// Dev server path of the bundler client.
    pub client: String,

    /// Dev server path of the React refresh runtime.
    pub refresh_runtime: String,

    /// Used in development when the hot file is missing or empty.
    pub fallback_url: String,
}

impl Default for HotConfig {
    fn default() -> Self {
        Self {
            file: "hot".into(),
            client: "@vite/client".into(),
            refresh_runtime: "@react-refresh".into(),
            fallback_url: "http://localhost:5173".into(),
        }
    }
}

impl HotConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.file.is_absolute() {
            diag.error("hot.file", "must be relative to build.public");
        }
        if self.client.trim().is_empty() {
            diag.error("hot.client", "must not be empty");
        }
        if url::Url::parse(&self.fallback_url).is_err() {
            diag.error_with_hint(
                "hot.fallback_url",
                format!("`{}` is not a URL", self.fallback_url),
                "e.g. \"http://localhost:5173\"",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};
    use std::path::Path;

    #[test]
    fn test_hot_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.hot.file, Path::new("hot"));
        assert_eq!(config.hot.client, "@vite/client");
        assert_eq!(config.hot.refresh_runtime, "@react-refresh");
        assert_eq!(config.hot.fallback_url, "http://localhost:5173");
    }

    #[test]
    fn test_hot_config_validate() {
        let config = test_parse_config(
            "[hot]\nfile = \"/tmp/hot\"\nclient = \"\"\nfallback_url = \"localhost\"",
        );
        let mut diag = ConfigDiagnostics::new();
        config.hot.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }
}
