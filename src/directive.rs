//! Template directives.
//!
//! Host templates reference assets with two directives:
//!
//! ```text
//! @viteReactRefresh
//! @vite('resources/js/app.tsx')
//! @vite(['resources/js/app.tsx', "resources/css/app.css"])
//! ```
//!
//! This is not a template language: everything that is not a directive is
//! copied through untouched.

use crate::error::AssetError;
use regex::Regex;
use std::sync::LazyLock;

const VITE_OPEN: &str = "@vite(";

/// `@vite( ... )` anchored at its start, arguments captured without the
/// parentheses. Quoted strings may contain `)`, `]` and `,`.
static VITE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^@vite\([ \t\r\n]*((?:\[(?:[^\]'"]|'[^']*'|"[^"]*")*\]|'[^']*'|"[^"]*")?)[ \t\r\n]*\)"#,
    )
    .expect("valid regex")
});

/// One quoted list item.
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'([^']*)'|"([^"]*)""#).expect("valid regex"));

/// A single quoted string literal, surrounding whitespace allowed.
static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[ \t\r\n]*(?:'([^']*)'|"([^"]*)")[ \t\r\n]*$"#).expect("valid regex")
});

const REFRESH_DIRECTIVE: &str = "@viteReactRefresh";

/// Markup producer behind the directives.
pub trait AssetTags {
    /// Tags for one or more entry points.
    fn entry_markup(&self, entries: &[String]) -> Result<String, AssetError>;

    /// Hot-reload bootstrap (empty outside development).
    fn refresh_markup(&self) -> Result<String, AssetError>;
}

/// Parse the argument list of `@vite(...)`.
///
/// Accepts one quoted string or a bracketed list of quoted strings.
/// Nothing at all (or an empty list) is a configuration mistake and
/// reported as [`AssetError::MissingEntryPoint`].
pub fn parse_entry_args(args: &str) -> Result<Vec<String>, AssetError> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return Err(AssetError::MissingEntryPoint);
    }

    let entries = match trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        Some(inner) => parse_list(inner).ok_or_else(|| invalid(args))?,
        None => vec![parse_quoted(trimmed).ok_or_else(|| invalid(args))?],
    };

    if entries.is_empty() || entries.iter().any(String::is_empty) {
        return Err(AssetError::MissingEntryPoint);
    }
    Ok(entries)
}

/// Quoted items separated by single commas, trailing comma allowed.
fn parse_list(inner: &str) -> Option<Vec<String>> {
    let mut entries = Vec::new();
    let mut last = 0;
    for caps in LIST_ITEM.captures_iter(inner) {
        let whole = caps.get(0)?;
        let separator = inner[last..whole.start()].trim();
        let expected = if entries.is_empty() { "" } else { "," };
        if separator != expected {
            return None;
        }
        let item = caps.get(1).or_else(|| caps.get(2))?;
        entries.push(item.as_str().to_string());
        last = whole.end();
    }

    match inner[last..].trim() {
        "" => Some(entries),
        "," if !entries.is_empty() => Some(entries),
        _ => None,
    }
}

fn parse_quoted(item: &str) -> Option<String> {
    let caps = QUOTED.captures(item)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

fn invalid(args: &str) -> AssetError {
    AssetError::InvalidDirective(args.trim().to_string())
}

/// Replace every directive in `template` with generated markup.
pub fn expand(template: &str, tags: &impl AssetTags) -> Result<String, AssetError> {
    let template = if template.contains(REFRESH_DIRECTIVE) {
        template.replace(REFRESH_DIRECTIVE, &tags.refresh_markup()?)
    } else {
        template.to_string()
    };

    let mut output = String::with_capacity(template.len());
    let mut last = 0;
    while let Some(offset) = template[last..].find(VITE_OPEN) {
        let start = last + offset;
        let rest = &template[start..];
        let Some(caps) = VITE_DIRECTIVE.captures(rest) else {
            let args = rest[VITE_OPEN.len()..].split(')').next().unwrap_or_default();
            return Err(invalid(args));
        };
        let (Some(whole), Some(args)) = (caps.get(0), caps.get(1)) else {
            return Err(invalid(rest));
        };
        let entries = parse_entry_args(args.as_str())?;
        output.push_str(&template[last..start]);
        output.push_str(&tags.entry_markup(&entries)?);
        last = start + whole.end();
    }
    output.push_str(&template[last..]);

    Ok(output)
}
