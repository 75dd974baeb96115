//! Sentiment daemon library exports.
//!
//! This crate provides the CLI binary that drives the sentiment service
//! over scored batch files.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations
//! - `input`: Batch file reading

pub mod cli;
pub mod commands;
pub mod input;

pub use cli::{Cli, Commands};
pub use commands::{
    handle_aggregate, handle_associations, handle_history, handle_search, handle_trending,
    init_logging, load_settings, open_service,
};
pub use input::{read_batch, Batch, BatchEntry};
