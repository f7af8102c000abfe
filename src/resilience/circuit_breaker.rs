//! Circuit breaker registry for content adapters.
//!
//! # States
//! - Closed: no entry, or failures below threshold
//! - Open: failures >= threshold and last failure within the cool-down window
//! - Half-Open: threshold reached but cool-down elapsed; next attempt probes
//!
//! # State Transitions
//! ```text
//! Closed → Open: failure_count >= threshold
//! Open → Half-Open: cool-down elapses (evaluated lazily, no timer)
//! Half-Open → Closed: probe succeeds (entry removed)
//! Half-Open → Open: probe fails (last_failure_at refreshed)
//! ```
//!
//! # Design Decisions
//! - Per-adapter breaker keyed by adapter name (not global)
//! - Entries created lazily on first failure, deleted on success
//! - Open predicate is pure and re-evaluated at every attempt
//! - Half-open admits whoever checks first after the window; concurrent
//!   requests may each probe before the first failure is recorded
//! - No gradual recovery

use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::CircuitBreakerConfig;

/// Failure bookkeeping for one adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerState {
    /// Consecutive failures since the last success.
    pub failure_count: u32,
    pub last_failure_at: Instant,
}

impl BreakerState {
    /// True while the adapter must be skipped.
    pub fn is_open_at(&self, now: Instant, threshold: u32, cool_down: Duration) -> bool {
        self.failure_count >= threshold
            && now.saturating_duration_since(self.last_failure_at) < cool_down
    }
}

/// Point-in-time view of one breaker, for stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakerSnapshot {
    pub failures: u32,
    pub last_failure_ms_ago: u64,
    pub open: bool,
}

/// Thread-safe map of adapter name → breaker state.
#[derive(Debug)]
pub struct BreakerRegistry {
    states: DashMap<String, BreakerState>,
    enabled: bool,
    threshold: u32,
    cool_down: Duration,
}

impl BreakerRegistry {
    pub fn new(enabled: bool, threshold: u32, cool_down: Duration) -> Self {
        Self {
            states: DashMap::new(),
            enabled,
            threshold,
            cool_down,
        }
    }

    pub fn from_config(config: &CircuitBreakerConfig) -> Self {
        Self::new(
            config.enabled,
            config.failure_threshold,
            Duration::from_secs(config.cool_down_secs),
        )
    }

    /// Whether `adapter` should be skipped right now. Always false when disabled.
    pub fn is_open(&self, adapter: &str) -> bool {
        if !self.enabled {
            return false;
        }
        self.states
            .get(adapter)
            .map(|s| s.is_open_at(Instant::now(), self.threshold, self.cool_down))
            .unwrap_or(false)
    }

    /// Count a failure and stamp it. Returns the new consecutive count.
    pub fn record_failure(&self, adapter: &str) -> u32 {
        if !self.enabled {
            return 0;
        }
        let now = Instant::now();
        let mut entry = self
            .states
            .entry(adapter.to_string())
            .or_insert(BreakerState {
                failure_count: 0,
                last_failure_at: now,
            });
        entry.failure_count = entry.failure_count.saturating_add(1);
        entry.last_failure_at = now;

        let count = entry.failure_count;
        if count == self.threshold {
            tracing::warn!(
                adapter,
                failures = count,
                cool_down_secs = self.cool_down.as_secs(),
                "Circuit breaker opened"
            );
        }
        count
    }

    /// Forget all failures for `adapter` (fully closed).
    pub fn reset(&self, adapter: &str) {
        if self.states.remove(adapter).is_some() {
            tracing::debug!(adapter, "Circuit breaker reset");
        }
    }

    pub fn state(&self, adapter: &str) -> Option<BreakerState> {
        self.states.get(adapter).map(|s| *s)
    }

    pub fn snapshot(&self) -> BTreeMap<String, BreakerSnapshot> {
        let now = Instant::now();
        self.states
            .iter()
            .map(|entry| {
                let state = entry.value();
                (
                    entry.key().clone(),
                    BreakerSnapshot {
                        failures: state.failure_count,
                        last_failure_ms_ago: now
                            .saturating_duration_since(state.last_failure_at)
                            .as_millis() as u64,
                        open: self.enabled
                            && state.is_open_at(now, self.threshold, self.cool_down),
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BreakerRegistry {
        BreakerRegistry::new(true, 3, Duration::from_secs(30))
    }

    #[tokio::test(start_paused = true)]
    async fn test_opens_at_threshold() {
        let breakers = registry();
        assert!(!breakers.is_open("magento"));

        breakers.record_failure("magento");
        breakers.record_failure("magento");
        assert!(!breakers.is_open("magento"));

        assert_eq!(breakers.record_failure("magento"), 3);
        assert!(breakers.is_open("magento"));
        assert!(!breakers.is_open("strapi"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_after_cool_down() {
        let breakers = registry();
        for _ in 0..3 {
            breakers.record_failure("magento");
        }

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(breakers.is_open("magento"));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!breakers.is_open("magento"));

        // Failed probe re-opens for a fresh window.
        assert_eq!(breakers.record_failure("magento"), 4);
        assert!(breakers.is_open("magento"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_closes() {
        let breakers = registry();
        for _ in 0..3 {
            breakers.record_failure("magento");
        }
        breakers.reset("magento");
        assert!(!breakers.is_open("magento"));
        assert!(breakers.state("magento").is_none());
        assert!(breakers.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_never_opens() {
        let breakers = BreakerRegistry::new(false, 1, Duration::from_secs(30));
        assert_eq!(breakers.record_failure("magento"), 0);
        assert!(!breakers.is_open("magento"));
        assert!(breakers.state("magento").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot() {
        let breakers = registry();
        breakers.record_failure("strapi");
        tokio::time::advance(Duration::from_millis(250)).await;

        let snapshot = breakers.snapshot();
        let strapi = &snapshot["strapi"];
        assert_eq!(strapi.failures, 1);
        assert_eq!(strapi.last_failure_ms_ago, 250);
        assert!(!strapi.open);
    }
}
