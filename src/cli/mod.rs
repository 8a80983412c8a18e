//! CLI module for mockapi
//!
//! Provides command-line interface for:
//! - serve: Serve an API document from an in-memory store
//! - check: Validate an API document and list its operations

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, describe, load_config, load_seed, run, run_command, seed_resources, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
