//! HTML tags emitted into pages.

use super::AssetClass;
use crate::utils::{html::escape_attr, path::has_url_scheme, path::join_url};
use std::fmt;

/// One injected tag. `Display` renders the HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `<script type="module" src="...">`
    Script(String),
    /// `<link rel="stylesheet" href="...">`
    Stylesheet(String),
    /// `<link rel="prefetch" href="..." as="...">`
    Prefetch { href: String, kind: AssetClass },
}

impl Tag {
    /// Tag loading `href` directly: stylesheets get a link, everything
    /// else a module script.
    pub fn entry(href: String) -> Self {
        match AssetClass::from_path(&href) {
            AssetClass::Stylesheet => Self::Stylesheet(href),
            AssetClass::Script | AssetClass::Other => Self::Script(href),
        }
    }

    /// Prefetch hint for `href`, `as` chosen by suffix.
    pub fn prefetch(href: String) -> Self {
        let kind = AssetClass::from_path(&href);
        Self::Prefetch { href, kind }
    }

    pub fn href(&self) -> &str {
        match self {
            Self::Script(href) | Self::Stylesheet(href) | Self::Prefetch { href, .. } => href,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Script(src) => {
                write!(f, r#"<script type="module" src="{}"></script>"#, escape_attr(src))
            }
            Self::Stylesheet(href) => {
                write!(f, r#"<link rel="stylesheet" href="{}">"#, escape_attr(href))
            }
            Self::Prefetch { href, kind } => write!(
                f,
                r#"<link rel="prefetch" href="{}" as="{}">"#,
                escape_attr(href),
                kind.prefetch_as()
            ),
        }
    }
}

/// Turn a manifest path into an href.
///
/// Absolute URLs pass through unchanged; everything else is rooted under
/// `base` (`"main.js"` with base `/` gives `/main.js`).
pub fn asset_href(base: &str, path: &str) -> String {
    if has_url_scheme(path) {
        return path.to_string();
    }
    let base = if base.is_empty() { "/" } else { base };
    join_url(base, path)
}
