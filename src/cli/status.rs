//! `status` command: what a page render would see right now.

use crate::{
    config::ViteConfig,
    engine::{AssetEngine, EngineState},
    hot::HotFile,
};
use anyhow::Result;
use owo_colors::OwoColorize;
use std::{fmt::Write as _, io::Write as _};

pub fn print_status(config: &ViteConfig, engine: &AssetEngine) -> Result<()> {
    let report = status_report(config, engine)?;
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{report}")?;
    stdout.flush()?;
    Ok(())
}

fn status_report(config: &ViteConfig, engine: &AssetEngine) -> Result<String> {
    let state = engine.state()?;
    let hot_file = HotFile::new(&engine.options().hot_file);
    let mut out = String::new();

    let config_path = if config.config_path.as_os_str().is_empty() {
        "(defaults)".to_string()
    } else {
        config.config_path.display().to_string()
    };
    writeln!(out, "{:<10}{}", "config".dimmed(), config_path)?;
    writeln!(out, "{:<10}{}", "mode".dimmed(), state.mode().bold())?;

    let hot = match hot_file.read()? {
        Some(url) if url.is_empty() => format!("{} (empty)", hot_file.path().display()),
        Some(url) => format!("{} -> {}", hot_file.path().display(), url),
        None => format!("{} (absent)", hot_file.path().display()),
    };
    writeln!(out, "{:<10}{}", "hot".dimmed(), hot)?;

    match state {
        EngineState::Development { base_url } => {
            writeln!(out, "{:<10}{}", "server".dimmed(), base_url)?;
        }
        EngineState::Production { manifest: Some(manifest) } => {
            let entries: Vec<_> = manifest.entries().map(|c| c.source_key()).collect();
            writeln!(
                out,
                "{:<10}{} ({} chunks)",
                "manifest".dimmed(),
                manifest.path().display(),
                manifest.len()
            )?;
            for entry in entries {
                writeln!(out, "  - {entry}")?;
            }
        }
        EngineState::Production { manifest: None } => {
            writeln!(
                out,
                "{:<10}{} (missing)",
                "manifest".dimmed(),
                engine.options().manifest_path.display()
            )?;
        }
    }

    Ok(out)
}
