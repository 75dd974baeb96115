//! Command implementations for the sentiment daemon.
//!
//! Every command loads configuration (defaults -> file -> env -> CLI),
//! builds the service over the history snapshot and prints its result as
//! pretty JSON on stdout. Logs go to stderr.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use sentiment_service::{PassPolicy, SentimentService};
use sentiment_types::Settings;

use crate::input::read_batch;

/// Load settings and apply CLI overrides (highest precedence).
pub fn load_settings(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
    history_path_override: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    if let Some(history_path) = history_path_override {
        settings.history_path = history_path.to_string();
    }
    Ok(settings)
}

/// Install the stderr tracing subscriber. `RUST_LOG` wins over the
/// configured level.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Build the service over the configured history snapshot.
pub fn open_service(settings: &Settings) -> SentimentService {
    info!("History path: {:?}", settings.expanded_history_path());
    SentimentService::new(settings)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

/// Run a full-corpus pass over a batch file.
pub async fn handle_aggregate(
    service: &SentimentService,
    input: &Path,
    breakdown: bool,
) -> Result<()> {
    let batch = read_batch(input)?;
    info!(items = batch.len(), "Loaded batch from {:?}", input);

    let report = service
        .run_pass(&batch.items, &batch.scores, PassPolicy::Wait)
        .await
        .context("Aggregation pass failed")?;

    if breakdown {
        let sources = service.source_breakdown(&batch.items, &batch.scores);
        print_json(&json!({ "report": report, "sources": sources }))
    } else {
        print_json(&report)
    }
}

/// Run a topic search over a batch file.
pub async fn handle_search(
    service: &SentimentService,
    query: &str,
    input: &Path,
    sources: &[String],
) -> Result<()> {
    let batch = read_batch(input)?.retain_sources(sources);
    let outcome = service
        .search_topic(query, sources, &batch.items, &batch.scores)
        .await
        .context("Search failed")?;
    print_json(&outcome)
}

pub fn handle_history(
    service: &SentimentService,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    limit: usize,
) -> Result<()> {
    print_json(&service.get_history(from, to, limit))
}

pub fn handle_trending(
    service: &SentimentService,
    hours: Option<i64>,
    limit: Option<usize>,
) -> Result<()> {
    print_json(&service.trending_topics(hours, limit))
}

pub fn handle_associations(
    service: &SentimentService,
    recent: Option<usize>,
    threshold: Option<f64>,
) -> Result<()> {
    print_json(&service.emotion_topic_associations(recent, threshold))
}
