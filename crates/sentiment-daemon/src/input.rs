//! Scored batch files.
//!
//! A batch file is a JSON array of `{ "item": ..., "score": ... }` entries,
//! the classifier's output paired with the content it scored.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sentiment_types::{EmotionScore, ScoredContentItem};

/// One scored content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub item: ScoredContentItem,
    #[serde(default)]
    pub score: EmotionScore,
}

/// Index-aligned items and scores.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub items: Vec<ScoredContentItem>,
    pub scores: Vec<EmotionScore>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keep only items from `sources`; an empty list keeps everything.
    pub fn retain_sources(self, sources: &[String]) -> Self {
        if sources.is_empty() {
            return self;
        }
        let (items, scores) = self
            .items
            .into_iter()
            .zip(self.scores)
            .filter(|(item, _)| sources.contains(&item.source))
            .unzip();
        Self { items, scores }
    }
}

impl FromIterator<BatchEntry> for Batch {
    fn from_iter<I: IntoIterator<Item = BatchEntry>>(iter: I) -> Self {
        let (items, scores) = iter.into_iter().map(|e| (e.item, e.score)).unzip();
        Self { items, scores }
    }
}

/// Read a batch file.
pub fn read_batch(path: &Path) -> Result<Batch> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read batch file {:?}", path))?;
    let entries: Vec<BatchEntry> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse batch file {:?}", path))?;
    Ok(entries.into_iter().collect())
}
