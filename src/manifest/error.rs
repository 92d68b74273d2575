//! Manifest loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a build manifest.
///
/// A missing manifest is not an error: see [`super::Manifest::load`].
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error when reading manifest `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("manifest `{}` is not valid JSON", .0.display())]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("manifest `{}` must be a JSON object keyed by source path", .0.display())]
    NotAnObject(PathBuf),

    #[error("invalid chunk `{key}` in manifest `{}`", .path.display())]
    Chunk {
        path: PathBuf,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("chunks `{first}` and `{second}` both output `{file}` in manifest `{}`", .path.display())]
    DuplicateOutput {
        path: PathBuf,
        file: String,
        first: String,
        second: String,
    },
}
