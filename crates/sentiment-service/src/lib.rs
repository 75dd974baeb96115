//! # sentiment-service
//!
//! Serving layer for sentiment-face.
//!
//! Provides:
//! - An explicitly owned current-state slot with change subscription
//! - A single-flight gate so only one aggregation pass mutates state at a time
//! - The full-corpus pass (publish + history append)
//! - Topic search aggregation recorded into history
//! - Per-source breakdown and history queries with configured defaults

pub mod error;
pub mod gate;
pub mod service;
pub mod state;

pub use error::ServiceError;
pub use gate::{PassGate, PassGuard, PassPolicy};
pub use service::{PassReport, SearchOutcome, SentimentService, EMPTY_SEARCH_MESSAGE};
pub use state::{CurrentState, PublishedState};
