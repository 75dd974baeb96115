//! Serving-layer state and the aggregation passes that mutate it.
//!
//! [`SentimentService`] owns the current-state slot, the history store and
//! the pass gate. Every mutation goes through a pass holding the gate; reads
//! go straight to the slot or the store.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sentiment_aggregator::{source_counts, Aggregator, DerivationPreset};
use sentiment_history::HistoryStore;
use sentiment_topics::TopicExtractor;
use sentiment_types::{
    AssociationConfig, EmotionScore, EmotionState, EmotionTopics, HistoryRecord,
    ScoredContentItem, SearchConfig, Settings, TopicEntry, TrendingConfig, TrendingTopic,
};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::ServiceError;
use crate::gate::{PassGate, PassPolicy};
use crate::state::{CurrentState, PublishedState};

/// Message returned by a search that found nothing.
pub const EMPTY_SEARCH_MESSAGE: &str = "No content found for this topic";

/// Result of a full-corpus aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    /// The state published into the current-state slot
    pub state: EmotionState,
    /// The appended history record; `None` for an empty batch
    pub record: Option<HistoryRecord>,
}

/// Result of an on-demand topic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub query: String,
    /// Items matched by the search
    pub count: usize,
    /// Aggregated state; `None` when nothing matched
    pub emotion: Option<EmotionState>,
    /// Related topics, excluding the query itself
    pub topics: Vec<TopicEntry>,
    /// Item count per searched source, zero counts included
    pub sources: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Explicitly owned serving state.
pub struct SentimentService {
    aggregator: Aggregator,
    extractor: TopicExtractor,
    history: Arc<HistoryStore>,
    current: CurrentState,
    gate: PassGate,
    topic_limit: usize,
    trending: TrendingConfig,
    associations: AssociationConfig,
    search: SearchConfig,
}

impl SentimentService {
    /// Build a service from settings, opening the history snapshot at the
    /// configured path.
    pub fn new(settings: &Settings) -> Self {
        let history = HistoryStore::open(
            settings.expanded_history_path(),
            settings.history_capacity,
        );
        Self::with_history(settings, Arc::new(history))
    }

    /// Build a service around an existing history store.
    pub fn with_history(settings: &Settings, history: Arc<HistoryStore>) -> Self {
        info!(
            records = history.len(),
            capacity = history.capacity(),
            "Sentiment service ready"
        );
        Self {
            aggregator: Aggregator::new(settings.weighting.clone()),
            extractor: TopicExtractor::new(settings.extraction.clone()),
            history,
            current: CurrentState::new(),
            gate: PassGate::new(),
            topic_limit: settings.extraction.topic_limit,
            trending: settings.trending.clone(),
            associations: settings.associations.clone(),
            search: settings.search.clone(),
        }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    pub fn current_state(&self) -> Arc<EmotionState> {
        self.current.current()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.current.last_updated()
    }

    /// Receiver woken on every published state.
    pub fn subscribe(&self) -> watch::Receiver<PublishedState> {
        self.current.subscribe()
    }

    /// Whether a pass currently holds the gate.
    pub fn is_pass_running(&self) -> bool {
        self.gate.is_running()
    }

    /// Run a full-corpus aggregation pass.
    ///
    /// Publishes the new state and appends it to history with the top
    /// topics and a per-source item count. Only items with a matching score
    /// take part. An empty batch publishes the neutral state without
    /// touching history.
    #[instrument(skip_all, fields(items = items.len(), policy = ?policy))]
    pub async fn run_pass(
        &self,
        items: &[ScoredContentItem],
        scores: &[EmotionScore],
        policy: PassPolicy,
    ) -> Result<PassReport, ServiceError> {
        let _guard = match self.gate.acquire(policy).await {
            Some(guard) => guard,
            None => {
                debug!("Aggregation pass already in flight, skipping");
                return Err(ServiceError::PassInFlight);
            }
        };

        let paired = items.len().min(scores.len());
        let (items, scores) = (&items[..paired], &scores[..paired]);

        let state = self
            .aggregator
            .aggregate(items, scores, DerivationPreset::FullCorpus);
        let published = self.current.publish(state);

        if items.is_empty() {
            warn!("No content available, published neutral state");
            return Ok(PassReport {
                state: (*published).clone(),
                record: None,
            });
        }

        let topics = self
            .extractor
            .extract_from_batch(items, scores, self.topic_limit);
        let record = self
            .history
            .append(&published, topics, source_counts(items));

        info!(
            dominant = %record.dominant_emotion,
            sentiment = published.overall_sentiment,
            "Aggregated {} items",
            items.len()
        );

        Ok(PassReport {
            state: (*published).clone(),
            record: Some(record),
        })
    }

    /// Aggregate a search batch for `query` and record it in history.
    ///
    /// `searched_sources` names the sources the search covered; the history
    /// entry and the outcome report a count for each, zero included. When it
    /// is empty the sources present in the batch are used. The current-state
    /// slot is left untouched.
    #[instrument(skip(self, items, scores), fields(items = items.len()))]
    pub async fn search_topic(
        &self,
        query: &str,
        searched_sources: &[String],
        items: &[ScoredContentItem],
        scores: &[EmotionScore],
    ) -> Result<SearchOutcome, ServiceError> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Err(ServiceError::InvalidQuery("query is empty".to_string()));
        }

        let sources = searched_source_counts(searched_sources, items);

        if items.is_empty() {
            info!(query = %query, "No content found for search");
            return Ok(SearchOutcome {
                query,
                count: 0,
                emotion: None,
                topics: Vec::new(),
                sources,
                message: Some(EMPTY_SEARCH_MESSAGE.to_string()),
            });
        }

        let _guard = self.gate.acquire(PassPolicy::Wait).await;

        let state = self
            .aggregator
            .aggregate(items, scores, DerivationPreset::TopicSearch);

        let mut related: Vec<TopicEntry> = self
            .extractor
            .extract_from_batch(items, scores, usize::MAX)
            .into_iter()
            .filter(|t| t.topic != query)
            .collect();

        let count = items.len();
        let mut history_topics = Vec::with_capacity(self.search.related_topics + 1);
        history_topics.push(TopicEntry::new(
            query.clone(),
            u32::try_from(count).unwrap_or(u32::MAX),
            state.overall_sentiment,
        ));
        history_topics.extend(related.iter().take(self.search.related_topics).cloned());

        self.history.append(&state, history_topics, sources.clone());

        related.truncate(self.search.response_topics);
        info!(
            query = %query,
            count,
            topics = related.len(),
            "Search aggregated"
        );

        Ok(SearchOutcome {
            query,
            count,
            emotion: Some(state),
            topics: related,
            sources,
            message: None,
        })
    }

    /// Aggregate each source's items on their own with the full-corpus
    /// preset.
    pub fn source_breakdown(
        &self,
        items: &[ScoredContentItem],
        scores: &[EmotionScore],
    ) -> BTreeMap<String, EmotionState> {
        let now = Utc::now();
        let mut batches: BTreeMap<&str, (Vec<ScoredContentItem>, Vec<EmotionScore>)> =
            BTreeMap::new();
        for (item, score) in items.iter().zip(scores) {
            let batch = batches.entry(item.source.as_str()).or_default();
            batch.0.push(item.clone());
            batch.1.push(*score);
        }

        batches
            .into_iter()
            .map(|(source, (items, scores))| {
                let state = self.aggregator.aggregate_at(
                    &items,
                    &scores,
                    DerivationPreset::FullCorpus,
                    now,
                );
                (source.to_string(), state)
            })
            .collect()
    }

    /// Records within `[from, to]`, newest first.
    pub fn get_history(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Vec<HistoryRecord> {
        self.history.get_history(from, to, limit)
    }

    /// Trending topics; unset arguments fall back to configured defaults.
    pub fn trending_topics(
        &self,
        window_hours: Option<i64>,
        limit: Option<usize>,
    ) -> Vec<TrendingTopic> {
        self.history.trending_topics(
            window_hours.unwrap_or(self.trending.window_hours),
            limit.unwrap_or(self.trending.limit),
        )
    }

    /// Emotion-topic associations; unset arguments fall back to configured
    /// defaults.
    pub fn emotion_topic_associations(
        &self,
        recent: Option<usize>,
        threshold: Option<f64>,
    ) -> Vec<EmotionTopics> {
        self.history.emotion_topic_associations(
            recent.unwrap_or(self.associations.recent_records),
            threshold.unwrap_or(self.associations.activation_threshold),
            self.associations.top_topics,
        )
    }
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn searched_source_counts(
    searched_sources: &[String],
    items: &[ScoredContentItem],
) -> BTreeMap<String, u32> {
    let counts = source_counts(items);
    if searched_sources.is_empty() {
        return counts;
    }
    searched_sources
        .iter()
        .map(|source| (source.clone(), counts.get(source).copied().unwrap_or(0)))
        .collect()
}
