//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Assetport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Assetport - design document asset export bridge
#[derive(Parser, Debug)]
#[command(name = "assetport")]
#[command(version, about, long_about = None)]
#[command(author = "Assetport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "assetport.toml", env = "ASSETPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ASSETPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the websocket command server
    Serve(commands::serve::ServeArgs),

    /// Export one component of a configured document
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["assetport", "serve"]);
        assert_eq!(cli.config, "assetport.toml");
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["assetport", "--config", "custom.toml", "serve"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["assetport", "--log-level", "debug", "serve"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from([
            "assetport",
            "export",
            "--file-name",
            "hero",
            "--document",
            "2",
            "--format",
            "jpg",
            "--quality",
            "80",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.file_name, "hero");
                assert_eq!(args.document, Some(2));
                assert_eq!(args.format.as_deref(), Some("jpg"));
                assert_eq!(args.quality, Some(80));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["assetport", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["assetport", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
