//! URL resolver: cache, then adapters in priority order.

use arc_swap::ArcSwap;
use std::cmp::Reverse;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::adapters::ContentAdapter;
use crate::config::ResolverConfig;
use crate::content::{ContentEnvelope, ResolveContext};
use crate::observability::metrics;
use crate::resilience::{BreakerRegistry, BreakerState};
use crate::resolver::cache::ResolutionCache;
use crate::resolver::stats::{AdapterSummary, ResolverStats};

type AdapterList = Vec<Arc<dyn ContentAdapter>>;

/// Decides which backend owns a slug and returns its envelope.
///
/// Constructed once at startup and shared via `Arc`. Owns the cache and the
/// breaker registry; the adapter list is swapped atomically on add/remove so
/// in-flight resolutions keep the list they started with.
pub struct UrlResolver {
    adapters: ArcSwap<AdapterList>,
    cache: Option<ResolutionCache>,
    breakers: BreakerRegistry,
}

impl UrlResolver {
    /// `cache: None` disables caching entirely.
    pub fn new(
        adapters: AdapterList,
        cache: Option<ResolutionCache>,
        breakers: BreakerRegistry,
    ) -> Self {
        let mut list = AdapterList::with_capacity(adapters.len());
        for adapter in adapters {
            insert_sorted(&mut list, adapter);
        }
        Self {
            adapters: ArcSwap::from_pointee(list),
            cache,
            breakers,
        }
    }

    pub fn from_config(config: &ResolverConfig, adapters: AdapterList) -> Self {
        let cache = config.cache.enabled.then(|| {
            ResolutionCache::new(
                Duration::from_secs(config.cache.ttl_secs),
                config.cache.max_entries,
            )
        });
        Self::new(
            adapters,
            cache,
            BreakerRegistry::from_config(&config.circuit_breaker),
        )
    }

    /// Resolve `slug` to an envelope, or `None` when no enabled adapter owns it.
    ///
    /// Adapter failures are absorbed: they count against that adapter's
    /// breaker and resolution moves on to the next adapter.
    pub async fn resolve(&self, slug: &str, context: ResolveContext) -> Option<ContentEnvelope> {
        let start = Instant::now();
        let context = context.complete(slug);

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(slug) {
                tracing::debug!(slug, source = %hit.source, "Served from cache");
                metrics::record_resolution("cache", start.elapsed());
                return Some(hit);
            }
        }

        let order: AdapterList = self
            .adapters
            .load()
            .iter()
            .filter(|a| a.is_enabled())
            .cloned()
            .collect();

        for adapter in &order {
            let name = adapter.name();

            if self.breakers.is_open(name) {
                tracing::info!(adapter = name, slug, "Circuit breaker open, skipping adapter");
                metrics::record_breaker_skip(name);
                continue;
            }

            tracing::debug!(
                adapter = name,
                slug,
                full_path = ?context.full_path,
                locale = ?context.locale,
                "Trying adapter"
            );

            match adapter.resolve(slug).await {
                Ok(Some(envelope)) => {
                    tracing::info!(
                        adapter = name,
                        entity_type = %envelope.entity_type,
                        slug,
                        "Content resolved"
                    );
                    if let Some(cache) = &self.cache {
                        cache.insert(slug, envelope.clone());
                    }
                    self.breakers.reset(name);
                    metrics::record_resolution("hit", start.elapsed());
                    return Some(envelope);
                }
                Ok(None) => {}
                Err(e) => {
                    let failures = self.breakers.record_failure(name);
                    tracing::error!(adapter = name, slug, failures, error = %e, "Adapter failed");
                    metrics::record_adapter_failure(name);
                }
            }
        }

        tracing::info!(slug, "No content found");
        metrics::record_resolution("miss", start.elapsed());
        None
    }

    /// Register an adapter. An adapter with the same name is replaced.
    pub fn add_adapter(&self, adapter: Arc<dyn ContentAdapter>) {
        tracing::info!(adapter = adapter.name(), priority = adapter.priority(), "Adding adapter");
        self.adapters.rcu(|current| {
            let mut next = AdapterList::clone(current);
            insert_sorted(&mut next, adapter.clone());
            next
        });
    }

    /// Unregister an adapter and drop its breaker state. Returns whether it existed.
    pub fn remove_adapter(&self, name: &str) -> bool {
        let mut removed = false;
        self.adapters.rcu(|current| {
            let next: AdapterList = current.iter().filter(|a| a.name() != name).cloned().collect();
            removed = next.len() != current.len();
            next
        });
        if removed {
            self.breakers.reset(name);
            tracing::info!(adapter = name, "Removed adapter");
        }
        removed
    }

    pub fn adapter(&self, name: &str) -> Option<Arc<dyn ContentAdapter>> {
        self.adapters.load().iter().find(|a| a.name() == name).cloned()
    }

    /// Toggle an adapter. Breaker state is left untouched. Returns whether it exists.
    pub fn set_adapter_enabled(&self, name: &str, enabled: bool) -> bool {
        match self.adapter(name) {
            Some(adapter) => {
                adapter.set_enabled(enabled);
                tracing::info!(adapter = name, enabled, "Adapter toggled");
                true
            }
            None => false,
        }
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
            tracing::info!("Resolution cache cleared");
        }
    }

    pub fn breaker_state(&self, name: &str) -> Option<BreakerState> {
        self.breakers.state(name)
    }

    pub fn stats(&self) -> ResolverStats {
        ResolverStats {
            cache_enabled: self.cache.is_some(),
            cache_size: self.cache.as_ref().map(ResolutionCache::len).unwrap_or(0),
            circuit_breakers: self.breakers.snapshot(),
            adapters: self
                .adapters
                .load()
                .iter()
                .map(|a| AdapterSummary {
                    name: a.name().to_string(),
                    enabled: a.is_enabled(),
                    priority: a.priority(),
                })
                .collect(),
        }
    }
}

/// Replace by name or append, then stable-sort by descending priority so
/// equal priorities keep registration order.
fn insert_sorted(list: &mut AdapterList, adapter: Arc<dyn ContentAdapter>) {
    match list.iter().position(|a| a.name() == adapter.name()) {
        Some(idx) => {
            tracing::warn!(adapter = adapter.name(), "Replacing adapter with the same name");
            list[idx] = adapter;
        }
        None => list.push(adapter),
    }
    list.sort_by_key(|a| Reverse(a.priority()));
}
