//! `tags`, `refresh` and `render` commands.

use crate::{directive, engine::AssetEngine};
use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

/// Print tags for `entries`, one per line.
pub fn print_tags(engine: &AssetEngine, entries: &[String]) -> Result<()> {
    let markup = engine.entry_markup(entries)?;
    write_line(&markup)
}

/// Print the refresh preamble. Prints nothing in production.
pub fn print_refresh(engine: &AssetEngine) -> Result<()> {
    let markup = engine.refresh_markup()?;
    if markup.is_empty() {
        return Ok(());
    }
    write_line(&markup)
}

/// Expand directives in `template` (`-` for stdin).
pub fn render_template(engine: &AssetEngine, template: &Path, output: Option<&Path>) -> Result<()> {
    let source = read_template(template)?;
    let rendered = directive::expand(&source, engine)
        .with_context(|| format!("Failed to render {}", template.display()))?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn read_template(template: &Path) -> Result<String> {
    if template == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read template from stdin")?;
        return Ok(source);
    }
    fs::read_to_string(template).with_context(|| format!("Failed to read {}", template.display()))
}

fn write_line(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}
