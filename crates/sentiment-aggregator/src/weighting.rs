//! Per-item weighting for emotion aggregation.
//!
//! Uses an exponential decay model with a half-life for recency. The decay
//! never drops below a configured floor.

use chrono::{DateTime, Utc};
use sentiment_types::{EmotionScore, ScoredContentItem, WeightingConfig};

/// Calculates the aggregation weight of a scored content item.
///
/// The weight combines:
/// - Engagement: `1 + engagement_score / engagement_scale`
/// - Recency: `max(floor, e^(-ln2 / half_life * age_hours))`
/// - Confidence: the classifier's confidence, used as-is
///
/// # Example
/// ```
/// use sentiment_aggregator::ItemWeigher;
/// use sentiment_types::WeightingConfig;
///
/// let weigher = ItemWeigher::new(WeightingConfig::default());
/// assert!((weigher.recency_weight(48.0) - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ItemWeigher {
    config: WeightingConfig,
}

impl ItemWeigher {
    pub fn new(config: WeightingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WeightingConfig {
        &self.config
    }

    /// Combined weight of `item` scored as `score`, evaluated at `now`.
    pub fn weight(
        &self,
        item: &ScoredContentItem,
        score: &EmotionScore,
        now: DateTime<Utc>,
    ) -> f64 {
        self.engagement_weight(item.engagement_score)
            * self.recency_weight(age_hours(item.timestamp, now))
            * confidence_weight(score.confidence)
    }

    /// Engagement multiplier.
    pub fn engagement_weight(&self, engagement_score: i64) -> f64 {
        1.0 + engagement_score as f64 / self.config.engagement_scale
    }

    /// Recency decay factor for an item `age_hours` old.
    ///
    /// Items from the future (negative age) are weighted above 1.0 by the
    /// same formula.
    pub fn recency_weight(&self, age_hours: f64) -> f64 {
        let decay_rate = std::f64::consts::LN_2 / self.config.half_life_hours;
        (-decay_rate * age_hours)
            .exp()
            .max(self.config.min_recency_weight)
    }
}

impl Default for ItemWeigher {
    fn default() -> Self {
        Self::new(WeightingConfig::default())
    }
}

/// Classifier confidence clamped to [0, 1]; NaN counts as zero.
fn confidence_weight(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// Hours between `timestamp` and `now`.
fn age_hours(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let duration = now.signed_duration_since(timestamp);
    duration.num_milliseconds() as f64 / 3_600_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_recency_half_life() {
        let weigher = ItemWeigher::default();
        assert!((weigher.recency_weight(0.0) - 1.0).abs() < 1e-12);
        assert!((weigher.recency_weight(24.0) - 0.5).abs() < 1e-12);
        assert!((weigher.recency_weight(48.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_recency_floor() {
        let weigher = ItemWeigher::default();
        // 2^-10 is far below the floor
        assert!((weigher.recency_weight(240.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_engagement_weight() {
        let weigher = ItemWeigher::default();
        assert!((weigher.engagement_weight(0) - 1.0).abs() < 1e-12);
        assert!((weigher.engagement_weight(500) - 1.5).abs() < 1e-12);
        assert!((weigher.engagement_weight(2000) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_sanitised() {
        assert_eq!(confidence_weight(f64::NAN), 0.0);
        assert_eq!(confidence_weight(-0.5), 0.0);
        assert_eq!(confidence_weight(1.7), 1.0);
        assert!((confidence_weight(0.4) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_combined_weight() {
        let weigher = ItemWeigher::default();
        let now = Utc::now();
        let item = ScoredContentItem::new("text", "reddit", now - Duration::hours(24))
            .with_engagement(1000);
        let score = EmotionScore {
            confidence: 0.5,
            ..EmotionScore::default()
        };
        // 2.0 * 0.5 * 0.5
        assert!((weigher.weight(&item, &score, now) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_confidence_zeroes_weight() {
        let weigher = ItemWeigher::default();
        let now = Utc::now();
        let item = ScoredContentItem::new("text", "reddit", now).with_engagement(5000);
        assert_eq!(weigher.weight(&item, &EmotionScore::default(), now), 0.0);
    }
}
