//! # sentiment-topics
//!
//! Topic extraction for sentiment-face.
//!
//! Headlines are tokenized into lowercase alphabetic words, filtered through
//! curated stop-word and generic-word tables, normalized through an explicit
//! stem table, and ranked by the number of documents mentioning them.
//!
//! ## Features
//! - Per-document de-duplication (one count per document per topic)
//! - Mean document sentiment per topic
//! - Custom lexicons for other corpora

pub mod extractor;
pub mod lexicon;

pub use extractor::TopicExtractor;
pub use lexicon::Lexicon;
