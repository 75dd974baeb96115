//! Scraped content items and their classifier scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::PrimaryEmotions;

/// Number of leading text characters used as a topic source when an item
/// has no title.
pub const DEFAULT_TITLE_PREFIX_CHARS: usize = 100;

/// A content item fetched from one source (a post, story or feed entry).
///
/// Immutable once created by the scraper layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredContentItem {
    pub text: String,
    #[serde(default)]
    pub title: String,
    /// Source identifier, e.g. "reddit"
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "timestampUTC", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Popularity signal such as upvotes
    #[serde(default)]
    pub engagement_score: i64,
    #[serde(default)]
    pub comment_count: u32,
}

impl ScoredContentItem {
    /// Create an item with no title, url or engagement.
    pub fn new(
        text: impl Into<String>,
        source: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            text: text.into(),
            title: String::new(),
            source: source.into(),
            url: String::new(),
            timestamp,
            engagement_score: 0,
            comment_count: 0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_engagement(mut self, engagement_score: i64) -> Self {
        self.engagement_score = engagement_score;
        self
    }

    /// Text used for topic extraction: the title if present, otherwise the
    /// first `prefix_chars` characters of the body.
    pub fn topic_text(&self, prefix_chars: usize) -> &str {
        if !self.title.is_empty() {
            return &self.title;
        }
        match self.text.char_indices().nth(prefix_chars) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

/// Classifier output for one content item.
///
/// Index-aligned with the item batch it was produced from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionScore {
    #[serde(default)]
    pub emotions: PrimaryEmotions,
    /// Sentiment in [-1, 1]
    #[serde(default)]
    pub sentiment_score: f64,
    /// Classifier certainty in [0, 1]; missing means 0
    #[serde(default)]
    pub confidence: f64,
}

impl EmotionScore {
    pub fn new(emotions: PrimaryEmotions, sentiment_score: f64, confidence: f64) -> Self {
        Self {
            emotions,
            sentiment_score,
            confidence,
        }
    }
}
