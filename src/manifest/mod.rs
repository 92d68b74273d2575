//! Build manifest model.
//!
//! The bundler writes a JSON object mapping each source key to a chunk
//! descriptor:
//!
//! ```json
//! {
//!   "app.tsx": { "file": "assets/app-1a2b.js", "isEntry": true, "css": ["assets/app-3c4d.css"] },
//!   "_vendor.js": { "file": "assets/vendor-5e6f.js", "assets": ["assets/logo-7a8b.svg"] }
//! }
//! ```
//!
//! The manifest is read once and never mutated. Chunks keep the order they
//! have in the file so everything derived from them is reproducible.

mod chunk;
mod error;

pub use chunk::Chunk;
pub use error::ManifestError;

use chunk::RawChunk;
use rustc_hash::FxHashMap;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// In-memory chunk graph.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    chunks: Vec<Chunk>,
    /// source key -> index into `chunks`
    by_key: FxHashMap<String, usize>,
}

impl Manifest {
    /// Read the manifest at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist: no build has been
    /// produced yet, which is a valid state until an entry is requested.
    pub fn load(path: &Path) -> Result<Option<Self>, ManifestError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ManifestError::Io(path.to_path_buf(), e)),
        };
        Self::parse(path, &content).map(Some)
    }

    /// Parse manifest JSON. `path` is only used for diagnostics.
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::Parse(path.to_path_buf(), e))?;

        let serde_json::Value::Object(map) = value else {
            return Err(ManifestError::NotAnObject(path.to_path_buf()));
        };

        // `preserve_order` keeps the map in file order
        let mut chunks = Vec::with_capacity(map.len());
        for (key, value) in map {
            let raw: RawChunk =
                serde_json::from_value(value).map_err(|source| ManifestError::Chunk {
                    path: path.to_path_buf(),
                    key: key.clone(),
                    source,
                })?;
            chunks.push(Chunk::from_raw(key, raw));
        }

        Self::from_chunks(path, chunks)
    }

    /// Assemble a manifest from chunks, enforcing unique output files.
    pub fn from_chunks(path: &Path, chunks: Vec<Chunk>) -> Result<Self, ManifestError> {
        let mut by_key = FxHashMap::default();
        {
            let mut by_file: FxHashMap<&str, &str> = FxHashMap::default();
            for (index, chunk) in chunks.iter().enumerate() {
                if let Some(first) = by_file.insert(chunk.output_file(), chunk.source_key()) {
                    return Err(ManifestError::DuplicateOutput {
                        path: path.to_path_buf(),
                        file: chunk.output_file().to_string(),
                        first: first.to_string(),
                        second: chunk.source_key().to_string(),
                    });
                }
                by_key.insert(chunk.source_key().to_string(), index);
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            chunks,
            by_key,
        })
    }

    /// Look up a chunk by source key.
    pub fn get(&self, key: &str) -> Option<&Chunk> {
        self.by_key.get(key).map(|&index| &self.chunks[index])
    }

    /// All chunks in manifest order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Directly requestable chunks, in manifest order.
    pub fn entries(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|chunk| chunk.is_entry())
    }

    /// File the manifest was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "main": { "file": "main.abc123.js", "isEntry": true, "css": ["main.def456.css"] },
        "_chunk-a.js": { "file": "chunk-a.js" },
        "admin.ts": { "file": "admin.987.js", "isEntry": true, "assets": ["logo.svg"] }
    }"#;

    #[test]
    fn test_parse_keeps_file_order() {
        let manifest = Manifest::parse(Path::new("manifest.json"), MANIFEST).unwrap();

        let keys: Vec<_> = manifest.chunks().iter().map(Chunk::source_key).collect();
        assert_eq!(keys, ["main", "_chunk-a.js", "admin.ts"]);
        assert_eq!(manifest.len(), 3);

        let entries: Vec<_> = manifest.entries().map(Chunk::source_key).collect();
        assert_eq!(entries, ["main", "admin.ts"]);
    }

    #[test]
    fn test_get() {
        let manifest = Manifest::parse(Path::new("manifest.json"), MANIFEST).unwrap();

        let main = manifest.get("main").unwrap();
        assert_eq!(main.output_file(), "main.abc123.js");
        assert_eq!(main.css(), ["main.def456.css"]);
        assert!(manifest.get("missing").is_none());
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let result = Manifest::load(&dir.path().join("manifest.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, MANIFEST).unwrap();

        let manifest = Manifest::load(&path).unwrap().unwrap();
        assert_eq!(manifest.path(), path);
        assert!(!manifest.is_empty());
    }

    #[test]
    fn test_empty_object_is_valid() {
        let manifest = Manifest::parse(Path::new("m.json"), "{}").unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = Manifest::parse(Path::new("m.json"), "{ not json").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(..)));
    }

    #[test]
    fn test_not_an_object() {
        let err = Manifest::parse(Path::new("m.json"), r#"["main.js"]"#).unwrap_err();
        assert!(matches!(err, ManifestError::NotAnObject(_)));
    }

    #[test]
    fn test_chunk_without_file() {
        let err = Manifest::parse(Path::new("m.json"), r#"{"main": {"isEntry": true}}"#)
            .unwrap_err();
        match err {
            ManifestError::Chunk { key, .. } => assert_eq!(key, "main"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_output_file() {
        let content = r#"{
            "a.ts": { "file": "same.js", "isEntry": true },
            "b.ts": { "file": "same.js", "isEntry": true }
        }"#;
        let err = Manifest::parse(Path::new("m.json"), content).unwrap_err();
        match err {
            ManifestError::DuplicateOutput {
                file,
                first,
                second,
                ..
            } => {
                assert_eq!(file, "same.js");
                assert_eq!(first, "a.ts");
                assert_eq!(second, "b.ts");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
