//! CLI argument parsing for the sentiment daemon.
//!
//! CLI flags override every other configuration source.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Sentiment Face
///
/// Aggregates scored content into an emotion state and keeps a queryable
/// history of past states.
#[derive(Parser, Debug)]
#[command(name = "sentiment-daemon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/sentiment-face/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override history snapshot path
    #[arg(long, global = true)]
    pub history_path: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Daemon commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full-corpus aggregation pass over a scored batch
    Aggregate {
        /// JSON array of {item, score} entries
        #[arg(short, long)]
        input: PathBuf,

        /// Also aggregate each source on its own
        #[arg(long)]
        breakdown: bool,
    },

    /// Aggregate a topic search batch and record it in history
    Search {
        /// Search term
        query: String,

        /// JSON array of {item, score} entries
        #[arg(short, long)]
        input: PathBuf,

        /// Sources searched (repeatable); other items in the batch are ignored
        #[arg(short, long = "source")]
        sources: Vec<String>,
    },

    /// List history records, newest first
    History {
        /// Earliest timestamp (RFC 3339)
        #[arg(long)]
        from: Option<DateTime<Utc>>,

        /// Latest timestamp (RFC 3339)
        #[arg(long)]
        to: Option<DateTime<Utc>>,

        /// Maximum results
        #[arg(long, default_value = "100")]
        limit: usize,
    },

    /// Rank topics over a trailing window
    Trending {
        /// Window length in hours (default from config)
        #[arg(long)]
        hours: Option<i64>,

        /// Maximum results (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Top topics per emotion over recent history
    Associations {
        /// Number of most recent records scanned (default from config)
        #[arg(long)]
        recent: Option<usize>,

        /// Minimum emotion value that counts (default from config)
        #[arg(long)]
        threshold: Option<f64>,
    },
}
