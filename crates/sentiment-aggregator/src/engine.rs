//! Weighted aggregation of scored content into one emotion state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sentiment_types::{
    Emotion, EmotionScore, EmotionState, PrimaryEmotions, ScoredContentItem, WeightingConfig,
};
use tracing::{debug, warn};

use crate::secondary::{intensity, DerivationPreset, SecondaryCoefficients};
use crate::weighting::ItemWeigher;

/// Combines a batch of `(item, score)` pairs into an [`EmotionState`].
///
/// Primary emotions and sentiment are weighted means; source contributions
/// are plain item-count shares and ignore the weights.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    weigher: ItemWeigher,
}

impl Aggregator {
    pub fn new(config: WeightingConfig) -> Self {
        Self {
            weigher: ItemWeigher::new(config),
        }
    }

    pub fn weigher(&self) -> &ItemWeigher {
        &self.weigher
    }

    /// Aggregate at the current time.
    pub fn aggregate(
        &self,
        items: &[ScoredContentItem],
        scores: &[EmotionScore],
        preset: DerivationPreset,
    ) -> EmotionState {
        self.aggregate_at(items, scores, preset, Utc::now())
    }

    /// Aggregate with recency measured against `now`.
    ///
    /// `items` and `scores` are index-aligned; surplus entries on either
    /// side are ignored. An empty batch or a batch whose weights sum to zero
    /// yields the neutral state.
    pub fn aggregate_at(
        &self,
        items: &[ScoredContentItem],
        scores: &[EmotionScore],
        preset: DerivationPreset,
        now: DateTime<Utc>,
    ) -> EmotionState {
        if items.len() != scores.len() {
            warn!(
                items = items.len(),
                scores = scores.len(),
                "Item/score batch length mismatch, aggregating the aligned prefix"
            );
        }
        let paired = items.len().min(scores.len());
        let items = &items[..paired];
        let scores = &scores[..paired];

        if items.is_empty() {
            debug!("No items to aggregate, returning neutral state");
            return EmotionState::neutral(now);
        }

        let mut total_weight = 0.0;
        let mut weighted = PrimaryEmotions::default();
        let mut weighted_sentiment = 0.0;

        for (item, score) in items.iter().zip(scores) {
            let weight = self.weigher.weight(item, score, now);
            if !weight.is_finite() {
                continue;
            }
            total_weight += weight;
            for emotion in Emotion::PRIMARY {
                let value = finite_or_zero(score.emotions.get(emotion));
                weighted.set(emotion, weighted.get(emotion) + value * weight);
            }
            weighted_sentiment += finite_or_zero(score.sentiment_score) * weight;
        }

        if total_weight <= 0.0 {
            debug!(items = items.len(), "Total weight is zero, returning neutral state");
            return EmotionState::neutral(now);
        }

        for emotion in Emotion::PRIMARY {
            weighted.set(emotion, (weighted.get(emotion) / total_weight).clamp(0.0, 1.0));
        }
        let overall_sentiment = (weighted_sentiment / total_weight).clamp(-1.0, 1.0);

        let emotions = SecondaryCoefficients::for_preset(preset).derive(&weighted);

        debug!(
            items = items.len(),
            total_weight,
            preset = %preset,
            "Aggregated emotion state"
        );

        EmotionState {
            emotions,
            overall_sentiment,
            intensity: intensity(&weighted),
            timestamp: now,
            source_contributions: source_contributions(items),
        }
    }
}

/// Item count per source.
pub fn source_counts(items: &[ScoredContentItem]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.source.clone()).or_insert(0) += 1;
    }
    counts
}

/// Share of items per source; empty for an empty batch.
pub fn source_contributions(items: &[ScoredContentItem]) -> BTreeMap<String, f64> {
    let total = items.len() as f64;
    source_counts(items)
        .into_iter()
        .map(|(source, count)| (source, f64::from(count) / total))
        .collect()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
