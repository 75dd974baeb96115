//! Windowed queries over history records: trending topics and
//! emotion-topic associations.
//!
//! Both functions take records oldest-first. Rankings are stable: equal
//! scores keep the order in which topics were first encountered.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sentiment_types::{Emotion, EmotionTopics, HistoryRecord, TrendingTopic};

#[derive(Debug)]
struct TrendStats {
    topic: String,
    mentions: u64,
    sentiment_sum: f64,
    /// Record-level dominant emotion histogram, first-seen order
    emotions: Vec<(Emotion, u32)>,
}

impl TrendStats {
    fn new(topic: String) -> Self {
        Self {
            topic,
            mentions: 0,
            sentiment_sum: 0.0,
            emotions: Vec::new(),
        }
    }

    fn record_emotion(&mut self, emotion: Emotion) {
        match self.emotions.iter_mut().find(|(e, _)| *e == emotion) {
            Some((_, count)) => *count += 1,
            None => self.emotions.push((emotion, 1)),
        }
    }

    /// Most frequent emotion; ties go to the first encountered.
    fn mode(&self) -> Emotion {
        let mut best = self.emotions[0];
        for &(emotion, count) in &self.emotions[1..] {
            if count > best.1 {
                best = (emotion, count);
            }
        }
        best.0
    }

    fn into_trending(self) -> TrendingTopic {
        let dominant_emotion = self.mode();
        TrendingTopic {
            avg_sentiment: self.sentiment_sum / self.mentions.max(1) as f64,
            topic: self.topic,
            mentions: self.mentions,
            dominant_emotion,
        }
    }
}

/// Rank topics mentioned in records stamped at or after `cutoff`.
///
/// `mentions` sums each record's topic count. `avg_sentiment` divides the
/// sum of per-record topic sentiments by `mentions`, so each record
/// contributes its sentiment once regardless of its count.
pub fn trending_topics<'a, I>(records: I, cutoff: DateTime<Utc>, limit: usize) -> Vec<TrendingTopic>
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<TrendStats> = Vec::new();

    for record in records.into_iter().filter(|r| r.timestamp >= cutoff) {
        for entry in &record.topics {
            let slot = *index.entry(entry.topic.as_str()).or_insert_with(|| {
                stats.push(TrendStats::new(entry.topic.clone()));
                stats.len() - 1
            });
            let s = &mut stats[slot];
            s.mentions += u64::from(entry.count);
            s.sentiment_sum += entry.sentiment;
            s.record_emotion(record.dominant_emotion);
        }
    }

    let mut trending: Vec<TrendingTopic> = stats
        .into_iter()
        .map(TrendStats::into_trending)
        .collect();
    trending.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    trending.truncate(limit);
    trending
}

/// Top topics per emotion over `records`.
///
/// For every record whose value for an emotion is at least `threshold`,
/// each of the record's topics gains that value as weight for the emotion.
/// Returns all ten emotions in enumeration order, each with up to `top_n`
/// topic names by descending weight.
pub fn emotion_topic_associations<'a, I>(
    records: I,
    threshold: f64,
    top_n: usize,
) -> Vec<EmotionTopics>
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    let mut weights: Vec<Vec<(&'a str, f64)>> = vec![Vec::new(); Emotion::ALL.len()];
    let mut index: Vec<HashMap<&'a str, usize>> = vec![HashMap::new(); Emotion::ALL.len()];

    for record in records {
        for (slot, emotion) in Emotion::ALL.into_iter().enumerate() {
            let value = record.emotions.get(emotion);
            if value < threshold {
                continue;
            }
            for entry in &record.topics {
                let topic = entry.topic.as_str();
                let position = *index[slot].entry(topic).or_insert_with(|| {
                    weights[slot].push((topic, 0.0));
                    weights[slot].len() - 1
                });
                weights[slot][position].1 += value;
            }
        }
    }

    Emotion::ALL
        .into_iter()
        .zip(weights)
        .map(|(emotion, mut ranked)| {
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            EmotionTopics {
                emotion,
                topics: ranked
                    .into_iter()
                    .take(top_n)
                    .map(|(topic, _)| topic.to_string())
                    .collect(),
            }
        })
        .collect()
}
