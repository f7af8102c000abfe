//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use content_resolver::adapters::{cms, commerce, AdapterError, ContentAdapter};
use content_resolver::backend::{QueryClient, QueryDescriptor, QueryError, QueryResponse};
use content_resolver::content::ContentEnvelope;
use content_resolver::resilience::BreakerRegistry;
use content_resolver::resolver::{ResolutionCache, UrlResolver};

/// In-memory backend: answers `(operation, slug)` pairs it was primed with,
/// empty data otherwise. Counts every query it receives.
#[derive(Default)]
pub struct ScriptedBackend {
    responses: Mutex<HashMap<(String, String), Value>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, operation: &str, slug: &str, data: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert((operation.to_string(), slug.to_string()), data);
    }

    /// Make every query fail at transport level.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryClient for ScriptedBackend {
    async fn query(
        &self,
        descriptor: &QueryDescriptor,
        variables: Value,
    ) -> Result<QueryResponse, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(QueryError::Status(503));
        }

        let slug = variables
            .as_object()
            .and_then(|vars| vars.values().find_map(Value::as_str))
            .unwrap_or_default()
            .to_string();
        let data = self
            .responses
            .lock()
            .unwrap()
            .get(&(descriptor.operation.to_string(), slug))
            .cloned()
            .unwrap_or_else(|| json!({}));
        Ok(QueryResponse::with_data(data))
    }
}

/// Adapter whose every call fails, as if its backend client blew up.
pub struct FailingAdapter {
    name: &'static str,
    priority: i32,
    enabled: AtomicBool,
    calls: AtomicUsize,
}

impl FailingAdapter {
    pub fn new(name: &'static str, priority: i32) -> Arc<Self> {
        Arc::new(Self {
            name,
            priority,
            enabled: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentAdapter for FailingAdapter {
    fn name(&self) -> &str {
        self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    async fn resolve(&self, _slug: &str) -> Result<Option<ContentEnvelope>, AdapterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AdapterError::Failed("backend client crashed".to_string()))
    }
}

pub fn commerce_adapter(backend: &Arc<ScriptedBackend>) -> Arc<dyn ContentAdapter> {
    Arc::new(commerce::adapter(backend.clone(), commerce::DEFAULT_PRIORITY))
}

pub fn cms_adapter(backend: &Arc<ScriptedBackend>) -> Arc<dyn ContentAdapter> {
    Arc::new(cms::adapter(backend.clone(), cms::DEFAULT_PRIORITY))
}

pub fn product(url_key: &str, name: &str) -> Value {
    json!({ "products": { "items": [{ "url_key": url_key, "name": name, "sku": url_key.to_uppercase() }] } })
}

pub fn cms_page(slug: &str, title: &str) -> Value {
    json!({ "pages": [{ "slug": slug, "title": title, "seo": { "metaDescription": "About " } }] })
}

pub fn article(slug: &str, title: &str) -> Value {
    json!({ "articles": [{ "slug": slug, "title": title, "description": "News" }] })
}

pub const CACHE_TTL: Duration = Duration::from_secs(300);
pub const COOL_DOWN: Duration = Duration::from_secs(30);

pub fn breakers() -> BreakerRegistry {
    BreakerRegistry::new(true, 3, COOL_DOWN)
}

pub fn cached_resolver(adapters: Vec<Arc<dyn ContentAdapter>>) -> UrlResolver {
    UrlResolver::new(adapters, Some(ResolutionCache::new(CACHE_TTL, 0)), breakers())
}

pub fn uncached_resolver(adapters: Vec<Arc<dyn ContentAdapter>>) -> UrlResolver {
    UrlResolver::new(adapters, None, breakers())
}
