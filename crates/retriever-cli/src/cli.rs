//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Retriever - load captured API calls from a bucket into the capture database.
#[derive(Debug, Parser)]
#[command(name = "retriever")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "RETRIEVER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Handle one trigger event and print the response
    Run(RunArgs),

    /// Create the capture schema
    Install,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Trigger event JSON file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub event: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command() {
        let cli = Cli::parse_from(["retriever", "run", "--event", "event.json"]);
        match cli.command {
            Command::Run(args) => assert_eq!(args.event, "event.json"),
            _ => panic!("Expected Run command"),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_run_defaults_to_stdin() {
        let cli = Cli::parse_from(["retriever", "run"]);
        match cli.command {
            Command::Run(args) => assert_eq!(args.event, "-"),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["retriever", "install", "--config", "retriever.toml"]);
        assert!(matches!(cli.command, Command::Install));
        assert_eq!(cli.config, Some(PathBuf::from("retriever.toml")));
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["retriever"]).is_err());
    }
}
