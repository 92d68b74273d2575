//! Tag kind dispatch by file suffix.

/// What an asset path refers to, judged by its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Script,
    Stylesheet,
    Other,
}

impl AssetClass {
    /// Classify a path or URL. Query string and fragment are ignored,
    /// the extension is matched case-insensitively.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return Self::Other;
        };

        match ext.to_ascii_lowercase().as_str() {
            "css" | "scss" | "sass" | "less" | "styl" | "stylus" | "pcss" | "postcss" => {
                Self::Stylesheet
            }
            "js" | "mjs" | "cjs" | "ts" | "mts" | "cts" | "jsx" | "tsx" | "vue" | "svelte" => {
                Self::Script
            }
            _ => Self::Other,
        }
    }

    /// Value of the `as` attribute on a prefetch hint.
    pub const fn prefetch_as(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Stylesheet => "style",
            Self::Other => "image",
        }
    }
}
