//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `serve` - Dev server resources (refresh preamble, runtime stubs)
//!
//! # Usage
//!
//! ```ignore
//! use embed::serve::{REFRESH_PREAMBLE, RefreshVars};
//!
//! let html = REFRESH_PREAMBLE.render(&RefreshVars {
//!     runtime_url: "http://localhost:5173/@react-refresh",
//! });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod serve {
    use super::{Template, TemplateVars};

    /// Variables for refresh.html template.
    pub struct RefreshVars<'a> {
        pub runtime_url: &'a str,
    }

    impl TemplateVars for RefreshVars<'_> {
        fn apply(&self, content: &str) -> String {
            // JSON string literal doubles as a JS one; `</` must not close the tag
            let literal = serde_json::to_string(self.runtime_url)
                .unwrap_or_else(|_| "\"\"".into())
                .replace("</", "<\\/");
            content.replace("__RUNTIME_URL__", &literal)
        }
    }

    /// Inline module script installing the React refresh runtime.
    pub const REFRESH_PREAMBLE: Template<RefreshVars<'static>> =
        Template::new(include_str!("serve/refresh.html"));

    /// Stand-in for the bundler client module.
    pub const CLIENT_JS: &str = include_str!("serve/client.js");

    /// Stand-in for the React refresh runtime module.
    pub const REFRESH_RUNTIME_JS: &str = include_str!("serve/react-refresh.js");
}

#[cfg(test)]
mod tests {
    use super::serve::*;

    #[test]
    fn test_refresh_vars_quote_url() {
        let html = REFRESH_PREAMBLE.render(&RefreshVars {
            runtime_url: "http://localhost:5173/@react-refresh",
        });
        assert!(html.contains(r#"from "http://localhost:5173/@react-refresh""#));
        assert!(!html.contains("__RUNTIME_URL__"));
    }

    #[test]
    fn test_refresh_vars_cannot_close_script() {
        let html = REFRESH_PREAMBLE.render(&RefreshVars {
            runtime_url: "http://x/</script><script>alert(1)",
        });
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_stubs_are_modules() {
        assert!(REFRESH_RUNTIME_JS.contains("export default RefreshRuntime"));
        assert!(!CLIENT_JS.is_empty());
    }
}
