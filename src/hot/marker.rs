//! The hot file: a plain-text marker holding the dev server URL.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Handle to the hot file path.
///
/// Only the dev server process writes or removes it; everyone else reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotFile {
    path: PathBuf,
}

impl HotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cheap existence probe. Presence alone means "dev server running".
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the URL, trimmed. `Ok(None)` if the file vanished.
    pub fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write `url` atomically: temp file in the same directory, then rename.
    ///
    /// The directory must exist. Readers see either no file or the full URL.
    pub fn write(&self, url: &str) -> io::Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(url.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Remove the file. Returns `Ok(false)` if it was already gone.
    pub fn remove(&self) -> io::Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
