//! Secondary emotions and intensity derived from the weighted primaries.
//!
//! Two coefficient presets exist. The full-corpus preset is used by the
//! periodic aggregation pass; the topic-search preset by on-demand query
//! aggregation. Callers pick the preset for their context.

use serde::{Deserialize, Serialize};

use sentiment_types::{Emotions, PrimaryEmotions};

/// Lower bound for intensity on the data-bearing path.
pub const MIN_INTENSITY: f64 = 0.3;

/// Multiplier applied to the mean absolute deviation of the primaries.
const INTENSITY_SCALE: f64 = 3.0;

/// Aggregation context that selects a coefficient preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DerivationPreset {
    /// Periodic aggregation over every source
    #[default]
    FullCorpus,
    /// On-demand aggregation over a topic search
    TopicSearch,
}

impl std::fmt::Display for DerivationPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DerivationPreset::FullCorpus => write!(f, "full_corpus"),
            DerivationPreset::TopicSearch => write!(f, "topic_search"),
        }
    }
}

/// Linear coefficients mapping primaries to the four derived emotions.
///
/// Each derived value is the weighted sum of its inputs, capped at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecondaryCoefficients {
    pub confusion_surprise: f64,
    pub confusion_fear: f64,
    pub pride_happiness: f64,
    pub loneliness_sadness: f64,
    pub loneliness_fear: f64,
    pub pain_sadness: f64,
    pub pain_anger: f64,
    pub pain_fear: f64,
}

impl SecondaryCoefficients {
    /// Coefficients for the periodic full-corpus pass.
    pub const fn full_corpus() -> Self {
        Self {
            confusion_surprise: 0.5,
            confusion_fear: 0.3,
            pride_happiness: 0.3,
            loneliness_sadness: 0.5,
            loneliness_fear: 0.0,
            pain_sadness: 0.3,
            pain_anger: 0.0,
            pain_fear: 0.2,
        }
    }

    /// Coefficients for on-demand topic search.
    pub const fn topic_search() -> Self {
        Self {
            confusion_surprise: 0.5,
            confusion_fear: 0.3,
            pride_happiness: 0.3,
            loneliness_sadness: 0.6,
            loneliness_fear: 0.2,
            pain_sadness: 0.4,
            pain_anger: 0.3,
            pain_fear: 0.2,
        }
    }

    pub const fn for_preset(preset: DerivationPreset) -> Self {
        match preset {
            DerivationPreset::FullCorpus => Self::full_corpus(),
            DerivationPreset::TopicSearch => Self::topic_search(),
        }
    }

    /// Build the full ten-emotion vector from `primary`.
    pub fn derive(&self, primary: &PrimaryEmotions) -> Emotions {
        let mut emotions = Emotions::from_primary(primary);
        emotions.confusion = (primary.surprise * self.confusion_surprise
            + primary.fear * self.confusion_fear)
            .min(1.0);
        emotions.pride = (primary.happiness * self.pride_happiness).min(1.0);
        emotions.loneliness = (primary.sadness * self.loneliness_sadness
            + primary.fear * self.loneliness_fear)
            .min(1.0);
        emotions.pain = (primary.sadness * self.pain_sadness
            + primary.anger * self.pain_anger
            + primary.fear * self.pain_fear)
            .min(1.0);
        emotions
    }
}

impl Default for SecondaryCoefficients {
    fn default() -> Self {
        Self::full_corpus()
    }
}

/// Expression intensity from the spread of the primaries.
///
/// `min(1, mean(|v - mean(v)|) * 3)`, floored at [`MIN_INTENSITY`].
pub fn intensity(primary: &PrimaryEmotions) -> f64 {
    let values = primary.values();
    let n = values.len() as f64;
    let avg = values.iter().sum::<f64>() / n;
    let spread = values.iter().map(|v| (v - avg).abs()).sum::<f64>() / n;
    (spread * INTENSITY_SCALE).min(1.0).max(MIN_INTENSITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary() -> PrimaryEmotions {
        PrimaryEmotions {
            happiness: 0.2,
            sadness: 0.5,
            anger: 0.4,
            fear: 0.3,
            surprise: 0.6,
            disgust: 0.1,
        }
    }

    #[test]
    fn test_full_corpus_preset() {
        let emotions = SecondaryCoefficients::full_corpus().derive(&primary());
        assert!((emotions.confusion - (0.6 * 0.5 + 0.3 * 0.3)).abs() < 1e-12);
        assert!((emotions.pride - 0.2 * 0.3).abs() < 1e-12);
        assert!((emotions.loneliness - 0.5 * 0.5).abs() < 1e-12);
        assert!((emotions.pain - (0.5 * 0.3 + 0.3 * 0.2)).abs() < 1e-12);
        assert!((emotions.sadness - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_topic_search_preset() {
        let emotions = SecondaryCoefficients::topic_search().derive(&primary());
        assert!((emotions.confusion - (0.6 * 0.5 + 0.3 * 0.3)).abs() < 1e-12);
        assert!((emotions.pride - 0.2 * 0.3).abs() < 1e-12);
        assert!((emotions.loneliness - (0.5 * 0.6 + 0.3 * 0.2)).abs() < 1e-12);
        assert!((emotions.pain - (0.5 * 0.4 + 0.4 * 0.3 + 0.3 * 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_derived_values_capped() {
        let saturated = PrimaryEmotions {
            happiness: 1.0,
            sadness: 1.0,
            anger: 1.0,
            fear: 1.0,
            surprise: 1.0,
            disgust: 1.0,
        };
        let emotions = SecondaryCoefficients::topic_search().derive(&saturated);
        assert_eq!(emotions.pain, 1.0);
        assert!((emotions.loneliness - 0.8).abs() < 1e-12);
        assert!((emotions.confusion - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(
            SecondaryCoefficients::for_preset(DerivationPreset::TopicSearch),
            SecondaryCoefficients::topic_search()
        );
        assert_eq!(
            SecondaryCoefficients::default(),
            SecondaryCoefficients::full_corpus()
        );
    }

    #[test]
    fn test_intensity_floor() {
        // Uniform primaries have no spread
        let flat = PrimaryEmotions {
            happiness: 0.4,
            sadness: 0.4,
            anger: 0.4,
            fear: 0.4,
            surprise: 0.4,
            disgust: 0.4,
        };
        assert!((intensity(&flat) - MIN_INTENSITY).abs() < 1e-12);
    }

    #[test]
    fn test_intensity_spread() {
        let peaked = PrimaryEmotions {
            happiness: 0.9,
            ..PrimaryEmotions::default()
        };
        // mean 0.15, deviations 0.75 + 5 * 0.15 = 1.5, mean dev 0.25, * 3
        assert!((intensity(&peaked) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_cap() {
        let split = PrimaryEmotions {
            happiness: 1.0,
            sadness: 1.0,
            anger: 1.0,
            ..PrimaryEmotions::default()
        };
        // mean dev 0.5 * 3 = 1.5 -> capped
        assert_eq!(intensity(&split), 1.0);
    }

    #[test]
    fn test_preset_display() {
        assert_eq!(DerivationPreset::FullCorpus.to_string(), "full_corpus");
        assert_eq!(DerivationPreset::TopicSearch.to_string(), "topic_search");
    }
}
