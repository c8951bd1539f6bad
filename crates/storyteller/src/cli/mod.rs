//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyteller binary.

mod commands;
mod serve;
mod tell;

pub use commands::{Cli, Commands};
pub use serve::run_server;
pub use tell::{TellOptions, tell_story};
