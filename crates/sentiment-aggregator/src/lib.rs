//! # sentiment-aggregator
//!
//! Weighted emotion aggregation for sentiment-face.
//!
//! Turns a batch of scored content items into one [`EmotionState`]:
//! - Engagement, recency and confidence weighting per item
//! - Weighted means of the six primary emotions and of sentiment
//! - Derived emotions from a selectable coefficient preset
//! - Intensity from the spread of the primaries
//!
//! [`EmotionState`]: sentiment_types::EmotionState

pub mod engine;
pub mod secondary;
pub mod weighting;

pub use engine::{source_contributions, source_counts, Aggregator};
pub use secondary::{intensity, DerivationPreset, SecondaryCoefficients, MIN_INTENSITY};
pub use weighting::ItemWeigher;
