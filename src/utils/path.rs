//! Path and URL utilities.
//!
//! - `has_url_scheme`: detect absolute URLs (`https://`, `data:`, `//cdn`)
//! - `join_url`: join a base and a relative path with exactly one slash
//! - `normalize_path`: filesystem paths to absolute form
//! - `resolve_under`: map a request URL to a file below a served root

use std::path::{Path, PathBuf};

/// Check if a link is an absolute URL that must be passed through unchanged.
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Start with an ASCII letter
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// Protocol-relative links (`//cdn.example.com/x.js`) count as absolute.
///
/// # Examples
/// ```
/// use tola_vite::utils::path::has_url_scheme;
/// assert!(has_url_scheme("https://cdn.example.com/app.js"));
/// assert!(has_url_scheme("data:image/png;base64,AAAA"));
/// assert!(has_url_scheme("//cdn.example.com/app.js"));
/// assert!(!has_url_scheme("assets/app.js"));
/// assert!(!has_url_scheme("/assets/app.js"));
/// ```
#[inline]
pub fn has_url_scheme(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    link.find(':').is_some_and(|pos| {
        let scheme = &link[..pos];
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Join `base` and `path` with exactly one `/` between them.
///
/// # Examples
/// ```
/// use tola_vite::utils::path::join_url;
/// assert_eq!(join_url("/", "app.js"), "/app.js");
/// assert_eq!(join_url("/build/", "/app.js"), "/build/app.js");
/// assert_eq!(join_url("http://localhost:5173", "@vite/client"), "http://localhost:5173/@vite/client");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a request URL to a file under `serve_root`, handling `index.html`
/// for directories.
///
/// Returns `None` for anything that escapes the root or does not exist.
pub fn resolve_under(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_request_url(url);

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize request URL: decode, strip query string and fragment, trim slashes.
fn normalize_request_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split(['?', '#']).next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}
