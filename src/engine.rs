//! Asset engine: one-time setup, then pure markup reads.
//!
//! Setup resolves the mode, then either reads the dev server URL from the
//! hot file or loads the manifest. It runs once per engine; concurrent
//! first callers wait on the in-flight setup instead of starting their own.
//! A failed setup is not cached, the next call tries again.

use crate::{
    config::ViteConfig,
    core::{Mode, ModePolicy, resolve_mode},
    debug,
    directive::AssetTags,
    error::AssetError,
    hot::HotFile,
    log,
    manifest::Manifest,
    markup::{self, ProductionOptions, UnknownEntryPolicy},
};
use parking_lot::Mutex;
use std::{path::PathBuf, sync::OnceLock};

/// Everything setup and markup generation need, detached from config
/// loading so hosts can build it however they like.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub manifest_path: PathBuf,
    pub hot_file: PathBuf,
    /// Prefix for production hrefs.
    pub base: String,
    pub policy: ModePolicy,
    /// Value of the mode environment variable, if set.
    pub environment: Option<String>,
    pub unknown_entry: UnknownEntryPolicy,
    /// Dev server path of the bundler client, emitted before entries.
    pub client: String,
    /// Dev server path of the React refresh runtime.
    pub refresh_runtime: String,
    /// Dev server URL used when the hot file cannot provide one.
    pub fallback_url: String,
}

impl EngineOptions {
    /// Build options from config, reading the mode environment variable now.
    pub fn from_config(config: &ViteConfig) -> Self {
        Self {
            manifest_path: config.manifest_path(),
            hot_file: config.hot_file_path(),
            base: config.build.base.clone(),
            policy: config.mode.policy,
            environment: std::env::var(&config.mode.env_var).ok(),
            unknown_entry: config.build.unknown_entry,
            client: config.hot.client.clone(),
            refresh_runtime: config.hot.refresh_runtime.clone(),
            fallback_url: config.hot.fallback_url.clone(),
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_config(&ViteConfig::default())
    }
}

/// Resolved state, immutable after setup.
#[derive(Debug)]
pub enum EngineState {
    Development {
        /// Dev server URL without trailing slash.
        base_url: String,
    },
    Production {
        /// `None` until a build has produced a manifest.
        manifest: Option<Manifest>,
    },
}

impl EngineState {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Development { .. } => Mode::Development,
            Self::Production { .. } => Mode::Production,
        }
    }
}

/// Resolves asset markup for pages.
#[derive(Debug)]
pub struct AssetEngine {
    options: EngineOptions,
    state: OnceLock<EngineState>,
    setup_lock: Mutex<()>,
}

impl AssetEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            state: OnceLock::new(),
            setup_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &ViteConfig) -> Self {
        Self::new(EngineOptions::from_config(config))
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Resolved state, running setup on first use.
    pub fn state(&self) -> Result<&EngineState, AssetError> {
        if let Some(state) = self.state.get() {
            return Ok(state);
        }

        let _guard = self.setup_lock.lock();
        // another caller may have finished setup while we waited
        if let Some(state) = self.state.get() {
            return Ok(state);
        }

        let state = self.setup()?;
        Ok(self.state.get_or_init(|| state))
    }

    pub fn mode(&self) -> Result<Mode, AssetError> {
        self.state().map(EngineState::mode)
    }

    fn setup(&self) -> Result<EngineState, AssetError> {
        let hot_file = HotFile::new(&self.options.hot_file);
        let marker_present = hot_file.exists();
        let mode = resolve_mode(
            self.options.policy,
            self.options.environment.as_deref(),
            marker_present,
        );
        debug!(
            "engine";
            "mode {} (policy {:?}, hot file {})",
            mode,
            self.options.policy,
            if marker_present { "present" } else { "absent" }
        );

        match mode {
            Mode::Development => Ok(EngineState::Development {
                base_url: self.dev_server_url(&hot_file, marker_present)?,
            }),
            Mode::Production => {
                let manifest = Manifest::load(&self.options.manifest_path)?;
                match &manifest {
                    Some(manifest) => debug!(
                        "engine";
                        "loaded {} chunks from {}",
                        manifest.len(),
                        manifest.path().display()
                    ),
                    None => debug!(
                        "engine";
                        "no manifest at {}",
                        self.options.manifest_path.display()
                    ),
                }
                Ok(EngineState::Production { manifest })
            }
        }
    }

    /// URL from the hot file, else the configured fallback.
    ///
    /// The existence probe and the read are separate steps: the file may
    /// vanish in between, which is not an error.
    fn dev_server_url(&self, hot_file: &HotFile, marker_present: bool) -> Result<String, AssetError> {
        let fallback = || self.options.fallback_url.trim_end_matches('/').to_string();
        if !marker_present {
            return Ok(fallback());
        }

        let content = hot_file
            .read()
            .map_err(|e| AssetError::HotFile(hot_file.path().to_path_buf(), e))?;

        match content {
            Some(url) if !url.is_empty() => {
                if url::Url::parse(&url).is_err() {
                    log!(
                        "warning";
                        "hot file {} does not hold a URL: {}",
                        hot_file.path().display(),
                        url
                    );
                }
                Ok(url.trim_end_matches('/').to_string())
            }
            Some(_) => {
                log!(
                    "warning";
                    "hot file {} is empty, using {}",
                    hot_file.path().display(),
                    self.options.fallback_url
                );
                Ok(fallback())
            }
            None => {
                debug!("engine"; "hot file vanished, using {}", self.options.fallback_url);
                Ok(fallback())
            }
        }
    }

    /// Tags for the requested entry points, one per line.
    ///
    /// An empty request is rejected before any setup work.
    pub fn entry_markup<S: AsRef<str>>(&self, entries: &[S]) -> Result<String, AssetError> {
        if entries.is_empty() {
            return Err(AssetError::MissingEntryPoint);
        }

        let tags = match self.state()? {
            EngineState::Development { base_url } => {
                markup::dev_tags(base_url, &self.options.client, entries)
            }
            EngineState::Production { manifest } => markup::production_tags(
                manifest.as_ref(),
                entries,
                &ProductionOptions {
                    base: &self.options.base,
                    unknown_entry: self.options.unknown_entry,
                    manifest_path: &self.options.manifest_path,
                },
            )?,
        };

        Ok(markup::render(&tags))
    }

    /// React refresh preamble in development, empty string in production.
    pub fn refresh_markup(&self) -> Result<String, AssetError> {
        Ok(match self.state()? {
            EngineState::Development { base_url } => {
                markup::refresh_preamble(base_url, &self.options.refresh_runtime)
            }
            EngineState::Production { .. } => String::new(),
        })
    }
}

impl AssetTags for AssetEngine {
    fn entry_markup(&self, entries: &[String]) -> Result<String, AssetError> {
        AssetEngine::entry_markup(self, entries)
    }

    fn refresh_markup(&self) -> Result<String, AssetError> {
        AssetEngine::refresh_markup(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, sync::Arc};
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "main": { "file": "main.abc123.js", "isEntry": true, "css": ["main.def456.css"] },
        "_chunk-a.js": { "file": "chunk-a.js" }
    }"#;

    fn make_options(dir: &TempDir) -> EngineOptions {
        EngineOptions {
            manifest_path: dir.path().join("manifest.json"),
            hot_file: dir.path().join("hot"),
            base: "/".into(),
            policy: ModePolicy::Marker,
            environment: None,
            unknown_entry: UnknownEntryPolicy::Error,
            client: "@vite/client".into(),
            refresh_runtime: "@react-refresh".into(),
            fallback_url: "http://localhost:5173".into(),
        }
    }

    #[test]
    fn test_empty_request_fails_before_setup() {
        let dir = TempDir::new().unwrap();
        // malformed manifest: setup would fail if it ran
        fs::write(dir.path().join("manifest.json"), "{").unwrap();
        let engine = AssetEngine::new(make_options(&dir));

        let entries: [&str; 0] = [];
        let err = engine.entry_markup(&entries).unwrap_err();
        assert!(matches!(err, AssetError::MissingEntryPoint));
        assert!(engine.state.get().is_none());
    }

    #[test]
    fn test_production_markup() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), MANIFEST).unwrap();
        let engine = AssetEngine::new(make_options(&dir));

        assert_eq!(engine.mode().unwrap(), Mode::Production);
        assert_eq!(
            engine.entry_markup(&["main"]).unwrap(),
            [
                r#"<script type="module" src="/main.abc123.js"></script>"#,
                r#"<link rel="stylesheet" href="/main.def456.css">"#,
                r#"<link rel="prefetch" href="/chunk-a.js" as="script">"#,
            ]
            .join("\n")
        );
        assert_eq!(engine.refresh_markup().unwrap(), "");
    }

    #[test]
    fn test_production_without_manifest() {
        let dir = TempDir::new().unwrap();
        let engine = AssetEngine::new(make_options(&dir));

        // setup succeeds: no build yet is a valid state
        assert_eq!(engine.mode().unwrap(), Mode::Production);
        assert!(matches!(
            engine.entry_markup(&["main"]),
            Err(AssetError::UnknownEntryPoint { .. })
        ));
    }

    #[test]
    fn test_development_markup() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), MANIFEST).unwrap();
        HotFile::new(dir.path().join("hot"))
            .write("http://[::1]:5173/")
            .unwrap();
        let engine = AssetEngine::new(make_options(&dir));

        assert_eq!(engine.mode().unwrap(), Mode::Development);
        assert_eq!(
            engine.entry_markup(&["resources/app.tsx"]).unwrap(),
            [
                r#"<script type="module" src="http://[::1]:5173/@vite/client"></script>"#,
                r#"<script type="module" src="http://[::1]:5173/resources/app.tsx"></script>"#,
            ]
            .join("\n")
        );

        let refresh = engine.refresh_markup().unwrap();
        assert!(refresh.contains(r#""http://[::1]:5173/@react-refresh""#));
    }

    #[test]
    fn test_empty_hot_file_uses_fallback() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hot"), "").unwrap();
        let engine = AssetEngine::new(make_options(&dir));

        let markup = engine.entry_markup(&["app.ts"]).unwrap();
        assert!(markup.starts_with(
            r#"<script type="module" src="http://localhost:5173/@vite/client">"#
        ));
    }

    #[test]
    fn test_environment_policy() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), MANIFEST).unwrap();
        HotFile::new(dir.path().join("hot"))
            .write("http://127.0.0.1:5173")
            .unwrap();

        let mut options = make_options(&dir);
        options.policy = ModePolicy::Environment;
        options.environment = Some("production".into());
        let engine = AssetEngine::new(options.clone());
        assert_eq!(engine.mode().unwrap(), Mode::Production);

        // development without a hot file falls back to the configured URL
        fs::remove_file(dir.path().join("hot")).unwrap();
        options.environment = None;
        let engine = AssetEngine::new(options);
        assert_eq!(engine.mode().unwrap(), Mode::Development);
        assert!(
            engine
                .entry_markup(&["app.ts"])
                .unwrap()
                .contains("http://localhost:5173/app.ts")
        );
    }

    #[test]
    fn test_setup_runs_once() {
        let dir = TempDir::new().unwrap();
        let hot = HotFile::new(dir.path().join("hot"));
        hot.write("http://127.0.0.1:5173").unwrap();
        let engine = AssetEngine::new(make_options(&dir));

        assert_eq!(engine.mode().unwrap(), Mode::Development);

        // later marker changes are not observed by this engine
        hot.remove().unwrap();
        assert_eq!(engine.mode().unwrap(), Mode::Development);
    }

    #[test]
    fn test_concurrent_first_use_shares_setup() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), MANIFEST).unwrap();
        let engine = Arc::new(AssetEngine::new(make_options(&dir)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    std::ptr::from_ref(engine.state().unwrap()) as usize
                })
            })
            .collect();
        let addrs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_failed_setup_is_retried() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, "{ broken").unwrap();
        let engine = AssetEngine::new(make_options(&dir));

        assert!(matches!(engine.mode(), Err(AssetError::Manifest(_))));

        fs::write(&path, MANIFEST).unwrap();
        assert_eq!(engine.mode().unwrap(), Mode::Production);
        assert!(engine.entry_markup(&["main"]).is_ok());
    }

    #[test]
    fn test_directive_expansion() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("manifest.json"), MANIFEST).unwrap();
        let engine = AssetEngine::new(make_options(&dir));

        let html = crate::directive::expand("<head>@viteReactRefresh@vite('main')</head>", &engine)
            .unwrap();
        assert!(html.starts_with(r#"<head><script type="module" src="/main.abc123.js">"#));
        assert!(html.ends_with(r#"as="script"></head>"#));
    }
}
