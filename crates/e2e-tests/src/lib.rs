//! End-to-end test infrastructure for sentiment-face.
//!
//! Provides a shared TestHarness and helpers for building scored batches
//! that exercise the aggregate -> history -> query pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use sentiment_history::HistoryStore;
use sentiment_service::SentimentService;
use sentiment_types::{EmotionScore, PrimaryEmotions, ScoredContentItem, Settings};

/// Shared test harness for E2E tests.
///
/// Owns a temp directory holding the history snapshot and a service built
/// over it.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Settings the service was built from
    pub settings: Settings,
    /// Snapshot file location
    pub history_path: PathBuf,
    pub service: SentimentService,
}

impl TestHarness {
    /// Create a harness with default settings and a fresh snapshot path.
    pub fn new() -> Self {
        Self::with_capacity(sentiment_types::DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a harness whose history holds at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let history_path = temp_dir.path().join("sentiment_history.json");
        let settings = Settings {
            history_path: history_path.to_string_lossy().to_string(),
            history_capacity: capacity,
            ..Settings::default()
        };
        let service = SentimentService::new(&settings);

        Self {
            _temp_dir: temp_dir,
            settings,
            history_path,
            service,
        }
    }

    /// Build a second service over the same snapshot, as after a restart.
    pub fn reopen(&self) -> SentimentService {
        SentimentService::new(&self.settings)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Service over an in-memory store, for tests that append many records.
pub fn in_memory_service(capacity: usize) -> SentimentService {
    SentimentService::with_history(
        &Settings::default(),
        Arc::new(HistoryStore::in_memory(capacity)),
    )
}

/// A titled item from `source`, `age_hours` old at `now`.
pub fn headline(
    title: &str,
    source: &str,
    age_hours: i64,
    now: DateTime<Utc>,
) -> ScoredContentItem {
    ScoredContentItem::new(title, source, now - Duration::hours(age_hours)).with_title(title)
}

/// A fully confident score with the given primaries and sentiment.
pub fn confident_score(primary: PrimaryEmotions, sentiment: f64) -> EmotionScore {
    EmotionScore::new(primary, sentiment, 1.0)
}

/// Primaries with only happiness and fear set.
pub fn happy_fearful(happiness: f64, fear: f64) -> PrimaryEmotions {
    PrimaryEmotions {
        happiness,
        fear,
        ..PrimaryEmotions::default()
    }
}

/// The reference headline batch: three sources, one shared topic.
pub fn headline_batch(now: DateTime<Utc>) -> (Vec<ScoredContentItem>, Vec<EmotionScore>) {
    let items = vec![
        headline("OpenAI launches new model", "reddit", 0, now),
        headline("new OpenAI product released", "hackernews", 0, now),
        headline("stock market news", "rss", 0, now),
    ];
    let scores = vec![
        confident_score(happy_fearful(0.8, 0.1), 0.8),
        confident_score(happy_fearful(0.6, 0.2), 0.6),
        confident_score(happy_fearful(0.1, 0.7), -0.2),
    ];
    (items, scores)
}

/// A batch where every title mentions each of `topics`, split over two
/// sources.
pub fn topic_batch(
    topics: &[&str],
    documents: usize,
    primary: PrimaryEmotions,
    sentiment: f64,
    now: DateTime<Utc>,
) -> (Vec<ScoredContentItem>, Vec<EmotionScore>) {
    let title = topics.join(" ");
    let items = (0..documents)
        .map(|i| {
            let source = if i % 2 == 0 { "reddit" } else { "hackernews" };
            headline(&title, source, 0, now)
        })
        .collect();
    let scores = vec![confident_score(primary, sentiment); documents];
    (items, scores)
}
