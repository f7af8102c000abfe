//! Slug → envelope cache with lazy TTL eviction.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::content::ContentEnvelope;
use crate::observability::metrics;

/// A cached resolution.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: ContentEnvelope,
    pub stored_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) > ttl
    }
}

/// Thread-safe resolution cache.
///
/// Keys are slugs exactly as received (case-sensitive). Expired entries are
/// only removed when read, or when a bounded cache needs room.
#[derive(Debug)]
pub struct ResolutionCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    /// 0 = unbounded. Once full, each new slug costs a scan of every entry
    /// (expired purge, then oldest lookup).
    max_entries: usize,
}

impl ResolutionCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries,
        }
    }

    /// Live entry for `slug`, evicting it first if it has expired.
    pub fn get(&self, slug: &str) -> Option<ContentEnvelope> {
        let now = Instant::now();
        match self.entries.get(slug) {
            None => {
                metrics::record_cache_event("miss");
                return None;
            }
            Some(entry) if !entry.is_expired(now, self.ttl) => {
                metrics::record_cache_event("hit");
                return Some(entry.value.clone());
            }
            Some(_) => {}
        }

        // Read guard released above; re-check under the write lock since a
        // concurrent writer may have refreshed the entry.
        self.entries
            .remove_if(slug, |_, entry| entry.is_expired(now, self.ttl));
        metrics::record_cache_event("expired");
        metrics::record_cache_size(self.entries.len());
        None
    }

    /// Store `value` under `slug`, overwriting any previous entry.
    pub fn insert(&self, slug: &str, value: ContentEnvelope) {
        if self.max_entries > 0 && !self.entries.contains_key(slug) {
            self.make_room();
        }
        self.entries.insert(
            slug.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
        metrics::record_cache_size(self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
        metrics::record_cache_size(0);
    }

    /// Purge expired entries, then the oldest ones, until there is room for one more.
    fn make_room(&self) {
        if self.entries.len() < self.max_entries {
            return;
        }

        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now, self.ttl));

        while self.entries.len() >= self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().stored_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    tracing::debug!(slug = %key, "Evicting oldest cache entry");
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}
