//! CLI module
//!
//! - init: write a default configuration file
//! - serve: boot the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, load_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
