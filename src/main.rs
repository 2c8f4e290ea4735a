//! Svar CLI entry point.

use anyhow::Result;
use clap::Parser;
use svar::cli::{commands, Cli, Commands};
use svar::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("svar={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command; the interactive loop is the default
    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Init => {
            commands::run_init(&settings)?;
        }

        Commands::Index { force } => {
            commands::run_index(force, settings).await?;
        }

        Commands::Ask { question, top_k } => {
            commands::run_ask(&question, top_k, settings).await?;
        }

        Commands::Search {
            query,
            limit,
            min_score,
        } => {
            commands::run_search(&query, limit, min_score, settings).await?;
        }

        Commands::Chat => {
            commands::run_chat(settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, settings)?;
        }
    }

    Ok(())
}
