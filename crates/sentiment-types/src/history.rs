//! Topic and history record types shared by the extractor and the store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emotion::{Emotion, EmotionState, Emotions};

/// A topic ranked from a batch of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEntry {
    /// Normalized lowercase token, at least three characters
    pub topic: String,
    /// Number of documents containing the topic
    pub count: u32,
    /// Mean sentiment of the contributing documents
    pub sentiment: f64,
}

impl TopicEntry {
    pub fn new(topic: impl Into<String>, count: u32, sentiment: f64) -> Self {
        Self {
            topic: topic.into(),
            count,
            sentiment,
        }
    }
}

/// A frozen history entry: emotion values, topics and source counts at the
/// time of an aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub emotions: Emotions,
    pub overall_sentiment: f64,
    pub intensity: f64,
    #[serde(default)]
    pub topics: Vec<TopicEntry>,
    /// Source name -> item count
    #[serde(default)]
    pub sources: BTreeMap<String, u32>,
    pub dominant_emotion: Emotion,
}

impl HistoryRecord {
    /// Freeze `state` into a record. Source contributions are not carried
    /// over; `sources` holds raw item counts instead.
    pub fn from_state(
        state: &EmotionState,
        topics: Vec<TopicEntry>,
        sources: BTreeMap<String, u32>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            emotions: state.emotions,
            overall_sentiment: state.overall_sentiment,
            intensity: state.intensity,
            topics,
            sources,
            dominant_emotion: state.emotions.dominant(),
        }
    }
}

/// A topic ranked over a trailing window of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub topic: String,
    pub mentions: u64,
    pub avg_sentiment: f64,
    /// Most frequent record-level dominant emotion among the topic's records
    pub dominant_emotion: Emotion,
}

/// Top topics associated with one emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionTopics {
    pub emotion: Emotion,
    /// Topic names by descending association weight
    pub topics: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_state_computes_dominant() {
        let mut state = EmotionState::neutral(Utc::now());
        state.emotions.happiness = 0.5;
        state.emotions.sadness = 0.5;
        state.source_contributions.insert("reddit".to_string(), 1.0);

        let record = HistoryRecord::from_state(&state, Vec::new(), BTreeMap::new(), Utc::now());
        assert_eq!(record.dominant_emotion, Emotion::Happiness);
        assert!(record.sources.is_empty());
    }

    #[test]
    fn test_record_json_shape() {
        let mut state = EmotionState::neutral(Utc::now());
        state.emotions.anger = 0.8;
        let mut sources = BTreeMap::new();
        sources.insert("rss".to_string(), 3);
        let record = HistoryRecord::from_state(
            &state,
            vec![TopicEntry::new("openai", 2, 0.7)],
            sources,
            Utc::now(),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["dominantEmotion"], "anger");
        assert_eq!(value["emotions"]["anger"], 0.8);
        assert_eq!(value["topics"][0]["topic"], "openai");
        assert_eq!(value["sources"]["rss"], 3);
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }
}
