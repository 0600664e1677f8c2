//! Retriever CLI library.
//!
//! Command parsing, configuration resolution and the `run` / `install`
//! commands behind the `retriever` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
