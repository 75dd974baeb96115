//! Capacity-bounded, snapshot-backed history of emotion states.
//!
//! Records are held in an immutable sequence behind an `Arc`. Each append
//! builds a new sequence and swaps it in, so readers clone the `Arc` and
//! always see a complete, consistent sequence. Appends are serialized by a
//! separate mutex that also covers the snapshot write.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, TimeDelta, Utc};
use sentiment_types::{
    EmotionState, EmotionTopics, HistoryRecord, TopicEntry, TrendingTopic,
    DEFAULT_HISTORY_CAPACITY,
};
use tracing::{error, info, instrument};

use crate::analytics;
use crate::error::HistoryError;
use crate::snapshot;

/// Immutable view of the record sequence, oldest first.
pub type HistorySnapshot = Arc<VecDeque<HistoryRecord>>;

/// Append-only, FIFO-bounded history store.
pub struct HistoryStore {
    path: Option<PathBuf>,
    capacity: usize,
    records: RwLock<HistorySnapshot>,
    append_lock: Mutex<()>,
}

impl HistoryStore {
    /// Open a store backed by the snapshot at `path`.
    ///
    /// A missing or unreadable snapshot yields an empty history.
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> Self {
        let path = path.as_ref().to_path_buf();
        let capacity = capacity.max(1);
        let records = snapshot::load_or_empty(&path, capacity);
        Self {
            path: Some(path),
            capacity,
            records: RwLock::new(Arc::new(records)),
            append_lock: Mutex::new(()),
        }
    }

    /// Create a store with no backing file.
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            path: None,
            capacity: capacity.max(1),
            records: RwLock::new(Arc::new(VecDeque::new())),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Current record sequence, oldest first.
    pub fn snapshot(&self) -> HistorySnapshot {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Append a record stamped with the current time.
    pub fn append(
        &self,
        state: &EmotionState,
        topics: Vec<TopicEntry>,
        sources: BTreeMap<String, u32>,
    ) -> HistoryRecord {
        self.append_at(state, topics, sources, Utc::now())
    }

    /// Append a record stamped `timestamp`.
    ///
    /// Timestamps never go backwards: a timestamp earlier than the newest
    /// record is raised to it. When the store is full the oldest record is
    /// evicted. The snapshot is then rewritten; a write failure is logged
    /// and the in-memory append stands.
    #[instrument(skip_all, fields(topics = topics.len()))]
    pub fn append_at(
        &self,
        state: &EmotionState,
        topics: Vec<TopicEntry>,
        sources: BTreeMap<String, u32>,
        timestamp: DateTime<Utc>,
    ) -> HistoryRecord {
        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let current = self.snapshot();
        let timestamp = match current.back() {
            Some(last) if last.timestamp > timestamp => last.timestamp,
            _ => timestamp,
        };
        let record = HistoryRecord::from_state(state, topics, sources, timestamp);

        let mut next: VecDeque<HistoryRecord> = (*current).clone();
        next.push_back(record.clone());
        while next.len() > self.capacity {
            next.pop_front();
        }
        let next = Arc::new(next);

        *self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next.clone();

        if let Some(path) = &self.path {
            if let Err(e) = snapshot::write_snapshot(path, next.iter()) {
                error!("Failed to save history: {}", e);
            }
        }

        info!(
            records = next.len(),
            dominant = %record.dominant_emotion,
            "Added history entry with {} topics",
            record.topics.len()
        );
        record
    }

    /// Rewrite the snapshot from the in-memory records.
    pub fn persist(&self) -> Result<(), HistoryError> {
        let path = self.path.as_ref().ok_or(HistoryError::NoSnapshotPath)?;
        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        snapshot::write_snapshot(path, self.snapshot().iter())
    }

    /// Records stamped within `[from, to]` (either bound optional), the
    /// newest `limit` of them, newest first.
    pub fn get_history(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Vec<HistoryRecord> {
        let records = self.snapshot();
        records
            .iter()
            .rev()
            .filter(|r| from.map_or(true, |f| r.timestamp >= f))
            .filter(|r| to.map_or(true, |t| r.timestamp <= t))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Trending topics over the trailing `window_hours`.
    pub fn trending_topics(&self, window_hours: i64, limit: usize) -> Vec<TrendingTopic> {
        self.trending_topics_at(Utc::now(), window_hours, limit)
    }

    /// Trending topics over the `window_hours` before `now`.
    ///
    /// A window reaching past the earliest representable time covers the
    /// whole store.
    pub fn trending_topics_at(
        &self,
        now: DateTime<Utc>,
        window_hours: i64,
        limit: usize,
    ) -> Vec<TrendingTopic> {
        let cutoff = TimeDelta::try_hours(window_hours)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        analytics::trending_topics(self.snapshot().iter(), cutoff, limit)
    }

    /// Top `top_n` topics per emotion over the newest `recent` records.
    pub fn emotion_topic_associations(
        &self,
        recent: usize,
        threshold: f64,
        top_n: usize,
    ) -> Vec<EmotionTopics> {
        let records = self.snapshot();
        let skip = records.len().saturating_sub(recent);
        analytics::emotion_topic_associations(records.iter().skip(skip), threshold, top_n)
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::in_memory(DEFAULT_HISTORY_CAPACITY)
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("path", &self.path)
            .field("capacity", &self.capacity)
            .field("records", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sentiment_types::{Emotion, Emotions};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn state(happiness: f64, sadness: f64) -> EmotionState {
        let mut state = EmotionState::neutral(Utc::now());
        state.emotions = Emotions {
            happiness,
            sadness,
            ..Emotions::default()
        };
        state
    }

    fn sources(name: &str, count: u32) -> BTreeMap<String, u32> {
        let mut map = BTreeMap::new();
        map.insert(name.to_string(), count);
        map
    }

    #[test]
    fn test_append_and_len() {
        let store = HistoryStore::in_memory(10);
        assert!(store.is_empty());
        store.append(&state(0.4, 0.1), Vec::new(), sources("reddit", 3));
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].sources["reddit"], 3);
    }

    #[test]
    fn test_dominant_tie_break() {
        let store = HistoryStore::in_memory(10);
        let record = store.append(&state(0.5, 0.5), Vec::new(), BTreeMap::new());
        assert_eq!(record.dominant_emotion, Emotion::Happiness);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let store = HistoryStore::in_memory(1000);
        let base = Utc::now();
        for i in 0..1001 {
            let topics = vec![TopicEntry::new(format!("topic{}", i), 2, 0.0)];
            store.append_at(
                &state(0.1, 0.0),
                topics,
                BTreeMap::new(),
                base + Duration::seconds(i),
            );
        }

        let records = store.snapshot();
        assert_eq!(records.len(), 1000);
        assert_eq!(records[0].topics[0].topic, "topic1");
        assert!(records.iter().all(|r| r.topics[0].topic != "topic0"));
        assert_eq!(records[999].topics[0].topic, "topic1000");
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let store = HistoryStore::in_memory(10);
        let now = Utc::now();
        store.append_at(&state(0.1, 0.0), Vec::new(), BTreeMap::new(), now);
        let record = store.append_at(
            &state(0.1, 0.0),
            Vec::new(),
            BTreeMap::new(),
            now - Duration::hours(1),
        );
        assert_eq!(record.timestamp, now);
    }

    #[test]
    fn test_get_history_range_and_order() {
        let store = HistoryStore::in_memory(10);
        let base = Utc::now();
        for i in 0..5 {
            store.append_at(
                &state(0.1 * i as f64, 0.0),
                Vec::new(),
                BTreeMap::new(),
                base + Duration::minutes(i),
            );
        }

        let all = store.get_history(None, None, 100);
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].timestamp, base + Duration::minutes(4));

        let ranged = store.get_history(
            Some(base + Duration::minutes(1)),
            Some(base + Duration::minutes(3)),
            100,
        );
        let minutes: Vec<i64> = ranged
            .iter()
            .map(|r| (r.timestamp - base).num_minutes())
            .collect();
        assert_eq!(minutes, vec![3, 2, 1]);

        let limited = store.get_history(None, Some(base + Duration::minutes(3)), 2);
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].timestamp, base + Duration::minutes(3));
        assert_eq!(limited[1].timestamp, base + Duration::minutes(2));
    }

    #[test]
    fn test_snapshot_reads_are_not_torn() {
        let store = HistoryStore::in_memory(10);
        store.append(&state(0.1, 0.0), Vec::new(), BTreeMap::new());
        let before = store.snapshot();
        store.append(&state(0.2, 0.0), Vec::new(), BTreeMap::new());
        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = HistoryStore::open(&path, 1000);
        store.append(
            &state(0.3, 0.6),
            vec![TopicEntry::new("storm", 4, -0.5)],
            sources("rss", 4),
        );
        store.append(&state(0.7, 0.1), Vec::new(), sources("reddit", 2));
        drop(store);

        let reopened = HistoryStore::open(&path, 1000);
        let records = reopened.snapshot();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].dominant_emotion, Emotion::Sadness);
        assert_eq!(records[0].topics[0].topic, "storm");
        assert_eq!(records[1].dominant_emotion, Emotion::Happiness);
    }

    #[test]
    fn test_write_failure_keeps_in_memory_record() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the snapshot file should be makes the rename fail
        let path = dir.path().join("history.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let store = HistoryStore::open(&path, 10);
        store.append(&state(0.2, 0.0), Vec::new(), BTreeMap::new());
        assert_eq!(store.len(), 1);
        assert!(store.persist().is_err());
    }

    #[test]
    fn test_in_memory_persist_errors() {
        let store = HistoryStore::in_memory(10);
        assert!(matches!(store.persist(), Err(HistoryError::NoSnapshotPath)));
    }

    #[test]
    fn test_associations_use_recent_records() {
        let store = HistoryStore::in_memory(10);
        store.append(
            &state(0.9, 0.0),
            vec![TopicEntry::new("old", 2, 0.0)],
            BTreeMap::new(),
        );
        store.append(
            &state(0.9, 0.0),
            vec![TopicEntry::new("new", 2, 0.0)],
            BTreeMap::new(),
        );

        let associations = store.emotion_topic_associations(1, 0.01, 5);
        assert_eq!(associations[0].topics, vec!["new"]);
    }

    #[test]
    fn test_trending_over_whole_store() {
        let store = HistoryStore::in_memory(10);
        let now = Utc::now();
        store.append_at(
            &state(0.5, 0.0),
            vec![TopicEntry::new("rust", 2, 0.4)],
            BTreeMap::new(),
            now - Duration::minutes(30),
        );
        store.append_at(
            &state(0.0, 0.5),
            vec![TopicEntry::new("rust", 3, 0.1), TopicEntry::new("go", 2, 0.0)],
            BTreeMap::new(),
            now,
        );

        let trending = store.trending_topics_at(now, 1, 10);
        assert_eq!(trending[0].topic, "rust");
        assert_eq!(trending[0].mentions, 5);
        assert_eq!(trending[0].dominant_emotion, Emotion::Happiness);
        assert_eq!(trending[1].topic, "go");
    }

    #[test]
    fn test_trending_huge_window_covers_whole_store() {
        let store = HistoryStore::in_memory(10);
        let now = Utc::now();
        store.append_at(
            &state(0.5, 0.0),
            vec![TopicEntry::new("ancient", 2, 0.0)],
            BTreeMap::new(),
            now - Duration::days(3650),
        );
        store.append_at(
            &state(0.5, 0.0),
            vec![TopicEntry::new("fresh", 3, 0.0)],
            BTreeMap::new(),
            now,
        );

        for window_hours in [10_000_000_000, i64::MAX] {
            let trending = store.trending_topics_at(now, window_hours, 10);
            let topics: Vec<&str> = trending.iter().map(|t| t.topic.as_str()).collect();
            assert_eq!(topics, vec!["fresh", "ancient"]);
        }
    }

    #[test]
    fn test_concurrent_appends_are_serialized() {
        const CAPACITY: usize = 5;
        const WRITERS: usize = 8;
        const APPENDS: usize = 4;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let store = Arc::new(HistoryStore::open(&path, CAPACITY));
        let done = Arc::new(AtomicBool::new(false));

        let reader = {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut reads = 0usize;
                loop {
                    assert!(store.snapshot().len() <= CAPACITY);
                    reads += 1;
                    if done.load(Ordering::Acquire) {
                        break reads;
                    }
                }
            })
        };

        let writers: Vec<_> = (0..WRITERS)
            .map(|w| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..APPENDS {
                        let topics = vec![TopicEntry::new(format!("w{}-{}", w, i), 2, 0.0)];
                        store.append(&state(0.3, 0.1), topics, sources("rss", 1));
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Release);
        assert!(reader.join().unwrap() > 0);

        let records = store.snapshot();
        assert_eq!(store.len(), CAPACITY);
        assert!(records
            .iter()
            .zip(records.iter().skip(1))
            .all(|(older, newer)| older.timestamp <= newer.timestamp));

        let reloaded = HistoryStore::open(&path, CAPACITY).snapshot();
        assert_eq!(reloaded.len(), records.len());
        for (saved, live) in reloaded.iter().zip(records.iter()) {
            assert_eq!(saved.timestamp, live.timestamp);
            assert_eq!(saved.dominant_emotion, live.dominant_emotion);
            assert_eq!(saved.topics[0].topic, live.topics[0].topic);
            assert_eq!(saved.sources, live.sources);
        }
    }
}
