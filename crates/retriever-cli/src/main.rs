//! Retriever CLI - load captured API calls into the capture database.

use clap::Parser;
use retriever_cli::commands;
use retriever_cli::config;
use retriever_cli::{Cli, Command};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Log to stderr; stdout carries the response
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> retriever_cli::Result<ExitCode> {
    let cli = Cli::parse();
    let config = config::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Run(args) => {
            let response = commands::execute_run(args, &config)?;
            if response.is_error() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Install => {
            commands::execute_install(&config)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
