//! Topic extraction from document titles.
//!
//! Each document contributes at most one count per distinct topic. A topic
//! survives when it appears in at least `min_document_count` documents and
//! carries the mean sentiment of those documents.

use std::collections::{HashMap, HashSet};

use sentiment_types::{EmotionScore, ExtractionConfig, ScoredContentItem, TopicEntry};
use tracing::debug;

use crate::lexicon::Lexicon;

/// Running totals for one topic across documents.
#[derive(Debug, Default)]
struct TopicStats {
    count: u32,
    sentiment_sum: f64,
}

/// Extracts ranked topics from a batch of documents.
#[derive(Debug, Clone, Default)]
pub struct TopicExtractor {
    lexicon: Lexicon,
    config: ExtractionConfig,
}

impl TopicExtractor {
    /// Create an extractor with the built-in lexicon.
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            lexicon: Lexicon::builtin(),
            config,
        }
    }

    /// Create an extractor with a custom lexicon.
    pub fn with_lexicon(config: ExtractionConfig, lexicon: Lexicon) -> Self {
        Self { lexicon, config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Rank topics over `(text, sentiment)` documents.
    ///
    /// Returns at most `limit` entries sorted by document count descending.
    /// Equal counts keep the order in which topics were first seen.
    pub fn extract(&self, documents: &[(&str, f64)], limit: usize) -> Vec<TopicEntry> {
        let mut order: Vec<String> = Vec::new();
        let mut stats: HashMap<String, TopicStats> = HashMap::new();

        for (text, sentiment) in documents {
            for word in self.document_topics(text) {
                let entry = stats.entry(word.clone()).or_insert_with(|| {
                    order.push(word);
                    TopicStats::default()
                });
                entry.count += 1;
                entry.sentiment_sum += sentiment;
            }
        }

        let mut topics: Vec<TopicEntry> = order
            .into_iter()
            .filter_map(|word| {
                let s = stats.remove(&word)?;
                (s.count >= self.config.min_document_count).then(|| {
                    TopicEntry::new(word, s.count, s.sentiment_sum / f64::from(s.count))
                })
            })
            .collect();

        topics.sort_by(|a, b| b.count.cmp(&a.count));
        topics.truncate(limit);

        debug!(
            documents = documents.len(),
            topics = topics.len(),
            "Extracted topics"
        );
        topics
    }

    /// Rank topics over an index-aligned item/score batch.
    ///
    /// Uses each item's title, or the first `title_prefix_chars` characters of
    /// its text when the title is empty. Items without a score count with
    /// sentiment 0.
    pub fn extract_from_batch(
        &self,
        items: &[ScoredContentItem],
        scores: &[EmotionScore],
        limit: usize,
    ) -> Vec<TopicEntry> {
        let documents: Vec<(&str, f64)> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let sentiment = scores.get(i).map(|s| s.sentiment_score).unwrap_or(0.0);
                (item.topic_text(self.config.title_prefix_chars), sentiment)
            })
            .collect();
        self.extract(&documents, limit)
    }

    /// Distinct normalized topic candidates of one document, in first
    /// occurrence order.
    pub fn document_topics(&self, text: &str) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut topics = Vec::new();

        for word in tokenize(text, self.config.min_token_len) {
            if self.lexicon.is_filtered(&word) {
                continue;
            }
            let normalized = self.lexicon.normalize(&word);
            if normalized.len() < self.config.min_token_len || seen.contains(normalized) {
                continue;
            }
            seen.insert(normalized.to_string());
            topics.push(normalized.to_string());
        }

        topics
    }
}

/// Tokenize text into lowercase alphabetic words.
///
/// Words are maximal runs of letters, digits and underscores; only runs made
/// entirely of ASCII letters with at least `min_len` characters are kept.
fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.len() >= min_len)
        .filter(|s| s.chars().all(|c| c.is_ascii_lowercase()))
        .map(String::from)
        .collect()
}
