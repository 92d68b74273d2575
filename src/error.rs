//! Errors surfaced by the asset engine.

use crate::manifest::ManifestError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// Configuration mistake at the call site: no entry point given.
    #[error("you must specify one or more entry points for vite")]
    MissingEntryPoint,

    /// Requested key is absent from the manifest, is not an entry chunk,
    /// or no manifest has been built yet.
    #[error("`{entry}` is not an entry point in `{}`", .manifest.display())]
    UnknownEntryPoint { entry: String, manifest: PathBuf },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("IO error when reading hot file `{}`", .0.display())]
    HotFile(PathBuf, #[source] std::io::Error),

    /// `@vite(...)` arguments that are not quoted strings.
    #[error("invalid @vite arguments `{0}`: expected 'entry' or ['entry', ...]")]
    InvalidDirective(String),
}

impl AssetError {
    /// Stable code, handy for host frameworks that map errors to responses.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingEntryPoint => "E_MISSING_VITE_ENTRYPOINT",
            Self::UnknownEntryPoint { .. } => "E_UNKNOWN_VITE_ENTRYPOINT",
            Self::Manifest(_) => "E_VITE_MANIFEST",
            Self::HotFile(..) => "E_VITE_HOT_FILE",
            Self::InvalidDirective(_) => "E_INVALID_VITE_DIRECTIVE",
        }
    }
}
