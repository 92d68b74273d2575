//! Prefetch set: non-entry artifacts the browser may fetch early.

use crate::manifest::Manifest;
use rustc_hash::FxHashSet;

/// Collect the prefetch set in manifest order, without duplicates.
///
/// - every non-entry chunk's output file
/// - the stylesheets of those non-entry chunks
/// - every static asset of every chunk, entry or not
///
/// The result depends only on the manifest, never on which entries a
/// page requested.
pub fn prefetch_set(manifest: &Manifest) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    let mut set = Vec::new();

    for chunk in manifest.chunks() {
        let (file, css) = if chunk.is_entry() {
            (None, &[][..])
        } else {
            (Some(chunk.output_file()), chunk.css())
        };

        let paths = file
            .into_iter()
            .chain(css.iter().map(String::as_str))
            .chain(chunk.assets().iter().map(String::as_str));

        for path in paths {
            if seen.insert(path) {
                set.push(path);
            }
        }
    }

    set
}
