//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Vite asset tags for server-rendered pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: tola-vite.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Public directory holding the manifest and the hot file
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub public: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print tags for one or more entry points
    #[command(visible_alias = "t")]
    Tags {
        /// Entry point keys (source paths as listed in the manifest)
        #[arg(value_name = "ENTRY")]
        entries: Vec<String>,
    },

    /// Print the React refresh preamble (empty in production)
    Refresh,

    /// Expand `@vite(...)` and `@viteReactRefresh` in a template
    #[command(visible_alias = "r")]
    Render {
        /// Template file, `-` for stdin
        #[arg(value_hint = clap::ValueHint::FilePath)]
        template: PathBuf,

        /// Write output to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Show the resolved mode, hot file and manifest
    Status,

    /// Start a development server and announce it through the hot file
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on (0 picks a free port)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let cli = Cli::parse_from(["tola-vite", "-v", "tags", "app.ts", "app.css"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Tags { entries } => assert_eq!(entries, ["app.ts", "app.css"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tola-vite", "status", "--public", "web", "-C", "x.toml"]);
        assert_eq!(cli.public, Some(PathBuf::from("web")));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::parse_from(["tola-vite", "serve", "-i", "0.0.0.0", "--port", "0"]);
        match cli.command {
            Commands::Serve { interface, port } => {
                assert_eq!(interface.map(|i| i.to_string()).as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
