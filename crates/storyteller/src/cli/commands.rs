//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Storyteller - illustrated picture-book stories on any topic
#[derive(Parser, Debug)]
#[command(name = "storyteller")]
#[command(about = "Illustrated picture-book stories on any topic", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to read instead of ./storyteller.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the story API over HTTP
    Serve {
        /// Interface to bind, overriding the configuration
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the configuration
        #[arg(long)]
        port: Option<u16>,

        /// Use the built-in story and placeholder pictures instead of Google APIs
        #[arg(long)]
        offline: bool,
    },

    /// Tell a story in the terminal, page by page
    Tell {
        /// What the story should be about
        topic: String,

        /// Also narrate each page and print the audio URL
        #[arg(long)]
        audio: bool,

        /// Use the built-in story and placeholder pictures instead of Google APIs
        #[arg(long)]
        offline: bool,
    },
}
