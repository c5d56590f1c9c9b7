//! CLI module
//!
//! Command-line interface for running queries.
//!
//! # Commands
//!
//! - `run` - Run a kind query and print entities as JSON lines
//! - `validate` - Check the configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{run_query, RunOptions, RunSummary, Runner};
