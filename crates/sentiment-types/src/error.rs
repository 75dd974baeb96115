//! Error types for the sentiment-face system.

use thiserror::Error;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
