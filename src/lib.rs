//! Vite asset integration for server-rendered pages.
//!
//! Given the entry points a page needs, produce the `<script>` / `<link>`
//! tags that load them: from the live dev server while one is announced
//! through the hot file, from the build manifest otherwise.
//!
//! ```no_run
//! use tola_vite::{config::ViteConfig, engine::AssetEngine};
//!
//! let config = ViteConfig::load(None)?;
//! let engine = AssetEngine::from_config(&config);
//! let head = engine.entry_markup(&["resources/js/app.tsx"])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod directive;
mod embed;
pub mod engine;
pub mod error;
pub mod hot;
pub mod logger;
pub mod manifest;
pub mod markup;
pub mod utils;

pub use engine::{AssetEngine, EngineOptions};
pub use error::AssetError;
