//! tola-vite - Vite asset tags for server-rendered pages.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tola_vite::{
    cli::{self, Cli, Commands},
    config::ViteConfig,
    engine::AssetEngine,
    log, logger,
};

fn main() {
    if let Err(e) = run() {
        log!("error"; "{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let mut config = ViteConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(public) = &cli.public {
        config.set_public(public);
    }

    match &cli.command {
        Commands::Tags { entries } => {
            cli::assets::print_tags(&AssetEngine::from_config(&config), entries)
        }
        Commands::Refresh => cli::assets::print_refresh(&AssetEngine::from_config(&config)),
        Commands::Render { template, output } => cli::assets::render_template(
            &AssetEngine::from_config(&config),
            template,
            output.as_deref(),
        ),
        Commands::Status => cli::status::print_status(&config, &AssetEngine::from_config(&config)),
        Commands::Serve { interface, port } => {
            config.apply_serve_options(*interface, *port);
            cli::serve::serve(&config)
        }
    }
}
