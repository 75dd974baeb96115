//! Single-flight gate around aggregation passes.
//!
//! At most one pass (periodic, manual refresh or topic search) touches the
//! current-state slot and the history store at a time. The policy decides
//! what a second caller does while a pass is in flight.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};

/// What to do when a pass is already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PassPolicy {
    /// Give up immediately. Used by the periodic job so ticks never pile up.
    #[default]
    Skip,

    /// Queue behind the in-flight pass. Used by refresh and search.
    Wait,
}

/// Gate shared by every pass against one service.
#[derive(Debug, Clone, Default)]
pub struct PassGate {
    lock: Arc<Mutex<()>>,
}

impl PassGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the gate under `policy`.
    ///
    /// Returns `None` only for [`PassPolicy::Skip`] when another pass holds
    /// the gate.
    pub async fn acquire(&self, policy: PassPolicy) -> Option<PassGuard> {
        let guard = match policy {
            PassPolicy::Skip => self.lock.clone().try_lock_owned().ok()?,
            PassPolicy::Wait => self.lock.clone().lock_owned().await,
        };
        Some(PassGuard { _guard: guard })
    }

    /// Whether a pass currently holds the gate.
    pub fn is_running(&self) -> bool {
        self.lock.try_lock().is_err()
    }
}

/// RAII guard; the gate reopens when it is dropped.
#[derive(Debug)]
pub struct PassGuard {
    _guard: OwnedMutexGuard<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_skip_while_running() {
        let gate = PassGate::new();

        let first = gate.acquire(PassPolicy::Skip).await;
        assert!(first.is_some());
        assert!(gate.is_running());
        assert!(gate.acquire(PassPolicy::Skip).await.is_none());

        drop(first);
        assert!(!gate.is_running());
        assert!(gate.acquire(PassPolicy::Skip).await.is_some());
    }

    #[tokio::test]
    async fn test_wait_queues_behind_running_pass() {
        let gate = PassGate::new();
        let first = gate.acquire(PassPolicy::Wait).await;

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.acquire(PassPolicy::Wait).await.is_some() })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(first);
        assert!(waiter.await.unwrap());
    }

    #[test]
    fn test_policy_default() {
        assert_eq!(PassPolicy::default(), PassPolicy::Skip);
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&PassPolicy::Wait).unwrap();
        assert_eq!(json, "\"wait\"");
        let back: PassPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PassPolicy::Wait);
    }
}
