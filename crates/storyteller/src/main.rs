//! Storyteller CLI binary.
//!
//! This binary provides command-line access to the story pipeline:
//! - Serve the story API over HTTP
//! - Tell a story in the terminal

use clap::Parser;
use storyteller::StorytellerConfig;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, TellOptions, run_server, tell_story};

    // API keys may live in a .env file
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    // Initialize tracing
    #[cfg(feature = "observability")]
    let _guard = storyteller::observability::init_observability(
        &storyteller::observability::ObservabilityConfig::default().with_log_level(log_level),
    )?;

    #[cfg(not(feature = "observability"))]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config = StorytellerConfig::load_with(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Serve {
            host,
            port,
            offline,
        } => {
            run_server(config, host, port, offline).await?;
        }

        Commands::Tell {
            topic,
            audio,
            offline,
        } => {
            tell_story(&config, &topic, &TellOptions { audio, offline }).await?;
        }
    }

    Ok(())
}
