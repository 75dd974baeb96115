//! # sentiment-types
//!
//! Shared domain types for the sentiment-face system.
//!
//! This crate defines the core data structures used throughout the system:
//! - Emotions: the fixed ten-emotion vocabulary and aggregated snapshots
//! - Content: scraped items and their per-item classifier scores
//! - History: topic entries, frozen history records and query results
//! - Settings: layered configuration
//!
//! ## Usage
//!
//! ```rust
//! use sentiment_types::{Emotion, Emotions};
//!
//! let emotions = Emotions { fear: 0.4, ..Emotions::default() };
//! assert_eq!(emotions.dominant(), Emotion::Fear);
//! ```

pub mod config;
pub mod content;
pub mod emotion;
pub mod error;
pub mod history;

pub use config::{
    AssociationConfig, ExtractionConfig, SearchConfig, Settings, TrendingConfig, WeightingConfig,
    DEFAULT_HISTORY_CAPACITY,
};
pub use content::{EmotionScore, ScoredContentItem, DEFAULT_TITLE_PREFIX_CHARS};
pub use emotion::{Emotion, EmotionState, Emotions, PrimaryEmotions, DEFAULT_INTENSITY};
pub use error::SentimentError;
pub use history::{EmotionTopics, HistoryRecord, TopicEntry, TrendingTopic};
