//! Configuration management for `tola-vite.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── hot        # [hot]
//! │   ├── mode       # [mode]
//! │   └── serve      # [serve] and [serve.hmr]
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # Config file lookup
//! └── mod.rs         # ViteConfig (this file)
//! ```
//!
//! The file is optional: without one, defaults apply relative to the
//! current directory. Relative paths in the file resolve against the
//! directory that contains it.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::{BuildConfig, HmrConfig, HotConfig, ModeConfig, ServeConfig};

use crate::{debug, log, utils::path::normalize_path};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::IpAddr,
    path::{Path, PathBuf},
};
use util::find_config_file;

/// Default config file name, searched upward from the current directory.
pub const CONFIG_FILE_NAME: &str = "tola-vite.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing tola-vite.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViteConfig {
    /// Absolute path to the config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file, or cwd
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub mode: ModeConfig,

    #[serde(default)]
    pub hot: HotConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl ViteConfig {
    /// Load configuration for the current directory.
    ///
    /// `explicit` is a user-supplied config path, which must exist; without
    /// it, a missing `tola-vite.toml` means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::Io(PathBuf::from("."), e))?;
        Self::load_from(explicit, &cwd)
    }

    fn load_from(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        let name = explicit.unwrap_or(Path::new(CONFIG_FILE_NAME));

        let config = match find_config_file(name, cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = normalize_path(&path);
                config.finalize(&root);
                config
            }
            None if explicit.is_some() => {
                return Err(ConfigError::Io(
                    name.to_path_buf(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
                ));
            }
            None => {
                debug!("config"; "no {} found, using defaults", CONFIG_FILE_NAME);
                let mut config = Self::default();
                config.finalize(cwd);
                config
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve directories against `root`.
    fn finalize(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.build.public = normalize_path(&root.join(&self.build.public));
        self.serve.root = normalize_path(&root.join(&self.serve.root));
        self.root = root;
    }

    // ========================================================================
    // derived paths
    // ========================================================================

    /// `{public}/{manifest}`
    pub fn manifest_path(&self) -> PathBuf {
        self.build.public.join(&self.build.manifest)
    }

    /// `{public}/{hot.file}`
    pub fn hot_file_path(&self) -> PathBuf {
        self.build.public.join(&self.hot.file)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Override the public directory; relative paths resolve against the cwd.
    pub fn set_public(&mut self, public: &Path) {
        self.build.public = normalize_path(public);
    }

    /// Apply `serve --interface/--port`.
    pub fn apply_serve_options(&mut self, interface: Option<IpAddr>, port: Option<u16>) {
        Self::update_option(&mut self.serve.interface, interface.as_ref());
        Self::update_option(&mut self.serve.port, port.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, collecting all errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.build.validate(&mut diag);
        self.mode.validate(&mut diag);
        self.hot.validate(&mut diag);
        diag.into_result()
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ViteConfig {
    let (parsed, ignored) = ViteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = ViteConfig::from_str("[build\nbase = \"/\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[build]\nbase = \"/b/\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = ViteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.build.base, "/b/");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ViteConfig::load_from(None, dir.path()).unwrap();

        let root = normalize_path(dir.path());
        assert_eq!(config.root, root);
        assert!(config.config_path.as_os_str().is_empty());
        assert_eq!(config.manifest_path(), root.join("public/manifest.json"));
        assert_eq!(config.hot_file_path(), root.join("public/hot"));
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("resources/js");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[build]\npublic = \"web\"\nmanifest = \".vite/manifest.json\"\n[hot]\nfile = \"vite.hot\"",
        )
        .unwrap();

        let config = ViteConfig::load_from(None, &nested).unwrap();
        let root = normalize_path(dir.path());
        assert_eq!(config.root, root);
        assert_eq!(config.config_path, root.join(CONFIG_FILE_NAME));
        assert_eq!(config.manifest_path(), root.join("web/.vite/manifest.json"));
        assert_eq!(config.hot_file_path(), root.join("web/vite.hot"));
        assert_eq!(config.serve.root, root.join("resources"));
    }

    #[test]
    fn test_load_explicit_missing() {
        let dir = TempDir::new().unwrap();
        let result = ViteConfig::load_from(Some(Path::new("custom.toml")), dir.path());
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_load_reports_all_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[build]\nbase = \"\"\nmanifest = \"/abs/manifest.json\"\n[hot]\nclient = \"\"",
        )
        .unwrap();

        match ViteConfig::load_from(None, dir.path()) {
            Err(ConfigError::Diagnostics(diag)) => assert_eq!(diag.len(), 3),
            other => panic!("expected diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = ViteConfig::default();
        config.apply_serve_options(Some("0.0.0.0".parse().unwrap()), None);
        assert_eq!(config.serve.interface.to_string(), "0.0.0.0");
        assert_eq!(config.serve.port, 5173);

        config.apply_serve_options(None, Some(0));
        assert_eq!(config.serve.port, 0);

        let dir = TempDir::new().unwrap();
        config.set_public(dir.path());
        assert_eq!(config.hot_file_path(), normalize_path(dir.path()).join("hot"));
    }
}
