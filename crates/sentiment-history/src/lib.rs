//! # sentiment-history
//!
//! Bounded, persisted history of aggregated emotion states.
//!
//! ## Features
//! - FIFO eviction once the store reaches capacity (1000 records by default)
//! - Whole-file JSON snapshot rewritten after every append
//! - Time-range queries, trending topics and emotion-topic associations
//! - Readers never observe a partially applied append

pub mod analytics;
pub mod error;
pub mod snapshot;
pub mod store;

pub use analytics::{emotion_topic_associations, trending_topics};
pub use error::HistoryError;
pub use store::{HistorySnapshot, HistoryStore};
