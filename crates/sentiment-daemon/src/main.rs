//! Sentiment Face daemon
//!
//! Aggregates scored content into an emotion state and queries the history.
//!
//! # Usage
//!
//! ```bash
//! sentiment-daemon aggregate --input batch.json [--breakdown]
//! sentiment-daemon search <query> --input batch.json [--source NAME]...
//! sentiment-daemon history [--from RFC3339] [--to RFC3339] [--limit N]
//! sentiment-daemon trending [--hours N] [--limit N]
//! sentiment-daemon associations [--recent N] [--threshold X]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/sentiment-face/config.toml)
//! 3. Environment variables (SENTIMENT_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use sentiment_daemon::{
    handle_aggregate, handle_associations, handle_history, handle_search, handle_trending,
    init_logging, load_settings, open_service, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(
        cli.config.as_deref(),
        cli.log_level.as_deref(),
        cli.history_path.as_deref(),
    )?;
    init_logging(&settings)?;
    let service = open_service(&settings);

    match cli.command {
        Commands::Aggregate { input, breakdown } => {
            handle_aggregate(&service, &input, breakdown).await?;
        }
        Commands::Search {
            query,
            input,
            sources,
        } => {
            handle_search(&service, &query, &input, &sources).await?;
        }
        Commands::History { from, to, limit } => {
            handle_history(&service, from, to, limit)?;
        }
        Commands::Trending { hours, limit } => {
            handle_trending(&service, hours, limit)?;
        }
        Commands::Associations { recent, threshold } => {
            handle_associations(&service, recent, threshold)?;
        }
    }

    Ok(())
}
