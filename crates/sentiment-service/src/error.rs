//! Error types for the service crate.

use sentiment_history::HistoryError;
use thiserror::Error;

/// Errors surfaced by service operations.
///
/// Aggregation itself never fails; these cover caller mistakes and the
/// explicit persistence primitives.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Another aggregation pass holds the gate
    #[error("An aggregation pass is already in flight")]
    PassInFlight,

    /// Search query is empty after normalisation
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// History snapshot error
    #[error("History error: {0}")]
    History(#[from] HistoryError),
}
