//! The current emotion state slot.
//!
//! Single writer, last write wins. Readers get an `Arc` to a complete state
//! and subscribers are woken on every publish.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sentiment_types::EmotionState;
use tokio::sync::watch;

/// A published state and when it was published.
#[derive(Debug, Clone)]
pub struct PublishedState {
    pub state: Arc<EmotionState>,
    /// `None` until the first pass publishes
    pub last_updated: Option<DateTime<Utc>>,
}

/// Explicitly owned holder of the current emotion state.
#[derive(Debug)]
pub struct CurrentState {
    tx: watch::Sender<PublishedState>,
}

impl CurrentState {
    /// Create a slot holding the neutral state.
    pub fn new() -> Self {
        let initial = PublishedState {
            state: Arc::new(EmotionState::default()),
            last_updated: None,
        };
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> Arc<EmotionState> {
        self.tx.borrow().state.clone()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.tx.borrow().last_updated
    }

    /// Replace the current state and notify subscribers.
    pub fn publish(&self, state: EmotionState) -> Arc<EmotionState> {
        let state = Arc::new(state);
        self.tx.send_replace(PublishedState {
            state: state.clone(),
            last_updated: Some(Utc::now()),
        });
        state
    }

    /// Receiver that observes every subsequent publish.
    pub fn subscribe(&self) -> watch::Receiver<PublishedState> {
        self.tx.subscribe()
    }
}

impl Default for CurrentState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_types::Emotions;

    fn fearful() -> EmotionState {
        let mut state = EmotionState::neutral(Utc::now());
        state.emotions = Emotions {
            fear: 0.7,
            ..Emotions::default()
        };
        state.intensity = 0.6;
        state
    }

    #[test]
    fn test_initial_state_is_neutral() {
        let slot = CurrentState::new();
        assert!(slot.current().is_neutral());
        assert!(slot.last_updated().is_none());
    }

    #[test]
    fn test_publish_replaces_state() {
        let slot = CurrentState::new();
        let published = slot.publish(fearful());
        assert_eq!(published.emotions.fear, 0.7);
        assert_eq!(slot.current().emotions.fear, 0.7);
        assert!(slot.last_updated().is_some());
    }

    #[tokio::test]
    async fn test_subscriber_sees_publish() {
        let slot = CurrentState::new();
        let mut rx = slot.subscribe();

        slot.publish(fearful());
        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.state.emotions.fear, 0.7);
        assert!(seen.last_updated.is_some());
    }
}
