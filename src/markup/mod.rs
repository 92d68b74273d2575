//! Markup generation for entry points.
//!
//! Pure functions over already-resolved state: the engine decides the mode
//! and hands over either the dev server URL or the manifest.
//!
//! | Mode        | Output                                                    |
//! |-------------|-----------------------------------------------------------|
//! | development | client tag + one tag per entry, pointing at the dev server |
//! | production  | entry tags with their css, then prefetch hints            |

mod kind;
mod prefetch;
mod tag;

pub use kind::AssetClass;
pub use prefetch::prefetch_set;
pub use tag::{Tag, asset_href};

use crate::{
    embed::serve::{REFRESH_PREAMBLE, RefreshVars},
    error::AssetError,
    log,
    manifest::Manifest,
    utils::path::{has_url_scheme, join_url},
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a requested key the manifest does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownEntryPolicy {
    /// Fail the request with `UnknownEntryPoint`.
    #[default]
    Error,
    /// Leave the entry out and log a warning.
    Skip,
}

/// Inputs for production markup besides the manifest itself.
#[derive(Debug, Clone, Copy)]
pub struct ProductionOptions<'a> {
    /// Prefix for every non-absolute href.
    pub base: &'a str,
    pub unknown_entry: UnknownEntryPolicy,
    /// Where the manifest is (or would be), for error messages.
    pub manifest_path: &'a Path,
}

/// Development tags: `client` first, then every entry, all served live.
///
/// No manifest lookup: entries are source files the dev server compiles.
pub fn dev_tags<S: AsRef<str>>(base_url: &str, client: &str, entries: &[S]) -> Vec<Tag> {
    std::iter::once(client)
        .chain(entries.iter().map(AsRef::as_ref))
        .map(|item| Tag::entry(dev_href(base_url, item)))
        .collect()
}

fn dev_href(base_url: &str, item: &str) -> String {
    if has_url_scheme(item) {
        item.to_string()
    } else {
        join_url(base_url, item)
    }
}

/// Production tags: each entry's own tag followed by its stylesheets, then
/// the prefetch set.
///
/// Entry-section hrefs are emitted once per response even when several
/// entries share a stylesheet. A stylesheet entry brings no extra css.
pub fn production_tags<S: AsRef<str>>(
    manifest: Option<&Manifest>,
    entries: &[S],
    options: &ProductionOptions<'_>,
) -> Result<Vec<Tag>, AssetError> {
    let mut tags = Vec::new();
    let mut emitted = FxHashSet::default();
    let mut push = |tag: Tag, tags: &mut Vec<Tag>| {
        if emitted.insert(tag.href().to_string()) {
            tags.push(tag);
        }
    };

    for entry in entries {
        let entry = entry.as_ref();
        let chunk = manifest
            .and_then(|m| m.get(entry))
            .filter(|chunk| chunk.is_entry());

        let Some(chunk) = chunk else {
            match options.unknown_entry {
                UnknownEntryPolicy::Error => {
                    return Err(AssetError::UnknownEntryPoint {
                        entry: entry.to_string(),
                        manifest: options.manifest_path.to_path_buf(),
                    });
                }
                UnknownEntryPolicy::Skip => {
                    log!("warning"; "skipping unknown entry point `{}`", entry);
                    continue;
                }
            }
        };

        let own = Tag::entry(asset_href(options.base, chunk.output_file()));
        let is_stylesheet = matches!(own, Tag::Stylesheet(_));
        push(own, &mut tags);

        if !is_stylesheet {
            for css in chunk.css() {
                push(Tag::Stylesheet(asset_href(options.base, css)), &mut tags);
            }
        }
    }

    if let Some(manifest) = manifest {
        tags.extend(
            prefetch_set(manifest)
                .into_iter()
                .map(|path| Tag::prefetch(asset_href(options.base, path))),
        );
    }

    Ok(tags)
}

/// Join tags, one per line.
pub fn render(tags: &[Tag]) -> String {
    tags.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inline script installing the React refresh runtime from the dev server.
///
/// Must run before any compiled component module, which expects the
/// `$RefreshReg$` / `$RefreshSig$` hooks to exist.
pub fn refresh_preamble(base_url: &str, runtime: &str) -> String {
    REFRESH_PREAMBLE.render(&RefreshVars {
        runtime_url: &dev_href(base_url, runtime),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Chunk;

    const MANIFEST_PATH: &str = "public/manifest.json";

    fn options(unknown_entry: UnknownEntryPolicy) -> ProductionOptions<'static> {
        ProductionOptions {
            base: "/",
            unknown_entry,
            manifest_path: Path::new(MANIFEST_PATH),
        }
    }

    fn sample() -> Manifest {
        Manifest::from_chunks(
            Path::new(MANIFEST_PATH),
            vec![
                Chunk::new(
                    "main",
                    "main.abc123.js",
                    true,
                    vec!["main.def456.css".into()],
                    vec![],
                ),
                Chunk::new("_chunk-a.js", "chunk-a.js", false, vec![], vec![]),
            ],
        )
        .unwrap()
    }

    fn shared() -> Manifest {
        Manifest::from_chunks(
            Path::new(MANIFEST_PATH),
            vec![
                Chunk::new(
                    "app.ts",
                    "app.1.js",
                    true,
                    vec!["shared.css".into(), "app.css".into()],
                    vec!["logo.svg".into()],
                ),
                Chunk::new(
                    "admin.ts",
                    "admin.2.js",
                    true,
                    vec!["shared.css".into(), "admin.css".into()],
                    vec![],
                ),
                Chunk::new("theme.css", "theme.3.css", true, vec![], vec![]),
                Chunk::new(
                    "_lazy.js",
                    "lazy.4.js",
                    false,
                    vec!["lazy.css".into()],
                    vec!["font.woff2".into()],
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_dev_tags() {
        let tags = dev_tags("http://localhost:5173", "@vite/client", &["app.tsx", "style.css"]);
        assert_eq!(tags.len(), 3);
        assert_eq!(
            render(&tags),
            [
                r#"<script type="module" src="http://localhost:5173/@vite/client"></script>"#,
                r#"<script type="module" src="http://localhost:5173/app.tsx"></script>"#,
                r#"<link rel="stylesheet" href="http://localhost:5173/style.css">"#,
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_dev_tags_count_and_client_first() {
        for n in 1..6 {
            let entries: Vec<String> = (0..n).map(|i| format!("entry{i}.ts")).collect();
            let tags = dev_tags("http://[::1]:5173", "@vite/client", &entries);
            assert_eq!(tags.len(), n + 1);
            assert_eq!(tags[0].href(), "http://[::1]:5173/@vite/client");
        }
    }

    #[test]
    fn test_production_round_trip() {
        let manifest = sample();
        let tags =
            production_tags(Some(&manifest), &["main"], &options(UnknownEntryPolicy::Error))
                .unwrap();

        assert_eq!(
            render(&tags),
            [
                r#"<script type="module" src="/main.abc123.js"></script>"#,
                r#"<link rel="stylesheet" href="/main.def456.css">"#,
                r#"<link rel="prefetch" href="/chunk-a.js" as="script">"#,
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_css_in_manifest_order_without_duplicates() {
        let manifest = shared();
        let tags = production_tags(
            Some(&manifest),
            &["app.ts", "admin.ts"],
            &options(UnknownEntryPolicy::Error),
        )
        .unwrap();

        let entry_hrefs: Vec<_> = tags
            .iter()
            .filter(|t| !matches!(t, Tag::Prefetch { .. }))
            .map(Tag::href)
            .collect();
        assert_eq!(
            entry_hrefs,
            [
                "/app.1.js",
                "/shared.css",
                "/app.css",
                "/admin.2.js",
                "/admin.css"
            ]
        );
    }

    #[test]
    fn test_stylesheet_entry() {
        let manifest = shared();
        let tags = production_tags(
            Some(&manifest),
            &["theme.css"],
            &options(UnknownEntryPolicy::Error),
        )
        .unwrap();
        assert_eq!(tags[0], Tag::Stylesheet("/theme.3.css".into()));
    }

    #[test]
    fn test_prefetch_independent_of_request_order() {
        let manifest = shared();
        let prefetches = |entries: &[&str]| -> Vec<Tag> {
            production_tags(Some(&manifest), entries, &options(UnknownEntryPolicy::Error))
                .unwrap()
                .into_iter()
                .filter(|t| matches!(t, Tag::Prefetch { .. }))
                .collect()
        };

        let forward = prefetches(&["app.ts", "admin.ts"]);
        let backward = prefetches(&["admin.ts", "app.ts"]);
        assert_eq!(forward, backward);
        assert_eq!(forward, prefetches(&["theme.css"]));

        let hrefs: Vec<_> = forward.iter().map(Tag::href).collect();
        assert_eq!(hrefs, ["/logo.svg", "/lazy.4.js", "/lazy.css", "/font.woff2"]);
    }

    #[test]
    fn test_unknown_entry_errors() {
        let manifest = sample();
        let err = production_tags(
            Some(&manifest),
            &["missing.ts"],
            &options(UnknownEntryPolicy::Error),
        )
        .unwrap_err();
        match err {
            AssetError::UnknownEntryPoint { entry, manifest } => {
                assert_eq!(entry, "missing.ts");
                assert_eq!(manifest, Path::new(MANIFEST_PATH));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_entry_chunk_is_not_requestable() {
        let manifest = sample();
        let result = production_tags(
            Some(&manifest),
            &["_chunk-a.js"],
            &options(UnknownEntryPolicy::Error),
        );
        assert!(matches!(result, Err(AssetError::UnknownEntryPoint { .. })));
    }

    #[test]
    fn test_unknown_entry_skipped() {
        let manifest = sample();
        let tags = production_tags(
            Some(&manifest),
            &["missing.ts", "main"],
            &options(UnknownEntryPolicy::Skip),
        )
        .unwrap();
        assert_eq!(tags[0].href(), "/main.abc123.js");
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_missing_manifest() {
        let result = production_tags(None, &["main"], &options(UnknownEntryPolicy::Error));
        assert!(matches!(result, Err(AssetError::UnknownEntryPoint { .. })));

        let tags = production_tags(None, &["main"], &options(UnknownEntryPolicy::Skip)).unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_base_prefix() {
        let manifest = sample();
        let opts = ProductionOptions {
            base: "/build/",
            ..options(UnknownEntryPolicy::Error)
        };
        let tags = production_tags(Some(&manifest), &["main"], &opts).unwrap();
        let hrefs: Vec<_> = tags.iter().map(Tag::href).collect();
        assert_eq!(
            hrefs,
            ["/build/main.abc123.js", "/build/main.def456.css", "/build/chunk-a.js"]
        );
    }

    #[test]
    fn test_refresh_preamble() {
        let html = refresh_preamble("http://localhost:5173", "@react-refresh");
        assert!(html.starts_with(r#"<script type="module">"#));
        assert!(html.contains(r#"import RefreshRuntime from "http://localhost:5173/@react-refresh""#));
        assert!(html.contains("RefreshRuntime.injectIntoGlobalHook(window)"));
        assert!(html.contains("window.$RefreshReg$ = () => {}"));
        assert!(html.contains("window.$RefreshSig$ = () => (type) => type"));
        assert!(html.contains("window.__vite_plugin_react_preamble_installed__ = true"));
        assert!(html.trim_end().ends_with("</script>"));
    }
}
