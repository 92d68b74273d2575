//! A single compiled output unit of the manifest graph.

use rustc_hash::FxHashSet;
use serde::Deserialize;

/// Chunk descriptor as written by the bundler.
///
/// Fields the engine does not use (`src`, `name`, `imports`,
/// `dynamicImports`, `isDynamicEntry`) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawChunk {
    file: String,
    #[serde(default)]
    is_entry: bool,
    #[serde(default)]
    css: Vec<String>,
    #[serde(default)]
    assets: Vec<String>,
}

/// One entry of the manifest graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    source_key: String,
    output_file: String,
    is_entry: bool,
    css: Vec<String>,
    assets: Vec<String>,
}

impl Chunk {
    /// Build a chunk directly. Duplicate assets collapse, first one wins.
    pub fn new(
        source_key: impl Into<String>,
        output_file: impl Into<String>,
        is_entry: bool,
        css: Vec<String>,
        assets: Vec<String>,
    ) -> Self {
        let mut seen = FxHashSet::default();
        let assets = assets
            .into_iter()
            .filter(|asset| seen.insert(asset.clone()))
            .collect();

        Self {
            source_key: source_key.into(),
            output_file: output_file.into(),
            is_entry,
            css,
            assets,
        }
    }

    pub(super) fn from_raw(source_key: String, raw: RawChunk) -> Self {
        Self::new(source_key, raw.file, raw.is_entry, raw.css, raw.assets)
    }

    /// Key used by entry point requests (the manifest object key).
    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Output path of the compiled artifact, relative to the public root.
    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    pub fn is_entry(&self) -> bool {
        self.is_entry
    }

    /// Stylesheets this chunk pulls in, in manifest order.
    pub fn css(&self) -> &[String] {
        &self.css
    }

    /// Static assets (images, fonts) bundled by this chunk.
    pub fn assets(&self) -> &[String] {
        &self.assets
    }
}
