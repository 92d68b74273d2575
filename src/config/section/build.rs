//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! public = "public"                  # Public web root
//! manifest = ".vite/manifest.json"   # Relative to public
//! base = "/build/"                   # Prefix for production hrefs
//! unknown_entry = "skip"             # Or "error"
//! ```

use crate::{config::ConfigDiagnostics, markup::UnknownEntryPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Public web root, holds the manifest and the hot file.
    pub public: PathBuf,

    /// Manifest file name, relative to `public`.
    pub manifest: PathBuf,

    /// Prefix for every production href.
    pub base: String,

    /// What to do when a requested entry is not in the manifest.
    pub unknown_entry: UnknownEntryPolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            public: "public".into(),
            manifest: "manifest.json".into(),
            base: "/".into(),
            unknown_entry: UnknownEntryPolicy::default(),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.base.is_empty() {
            diag.error_with_hint("build.base", "must not be empty", "use \"/\" for the site root");
        }
        if self.manifest.is_absolute() {
            diag.error_with_hint(
                "build.manifest",
                "must be relative to build.public",
                "e.g. \".vite/manifest.json\"",
            );
        }
    }
}
