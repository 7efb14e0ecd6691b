//! CLI module - Command-line interface for gadgetry
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gadgetry - authenticated gadget inventory service
#[derive(Parser, Debug)]
#[command(name = "gadgetry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default search path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    #[command(alias = "run")]
    Serve,

    /// Create default config file
    Init,

    /// Load and validate configuration, then exit
    CheckConfig,
}

impl Cli {
    #[must_use]
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::parse_from(["gadgetry"]);
        assert_eq!(cli.resolved_command(), Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_config_flag_and_subcommand() {
        let cli = Cli::parse_from(["gadgetry", "check-config", "--config", "alt.toml"]);
        assert_eq!(cli.resolved_command(), Commands::CheckConfig);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
