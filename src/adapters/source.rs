//! Generic adapter driven by an ordered lookup list.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::adapters::{AdapterError, ContentAdapter};
use crate::backend::{QueryClient, QueryDescriptor, QueryError};
use crate::content::{ContentEnvelope, ContentMetadata, EntityType, SourceId};
use crate::observability::metrics;

/// Derives display metadata from a matched record.
pub type MetadataFn = fn(&Value) -> ContentMetadata;

/// One candidate interpretation of a slug.
#[derive(Debug, Clone)]
pub struct LookupStep {
    /// Entity type declared for a hit on this step.
    pub entity_type: EntityType,
    pub query: QueryDescriptor,
    /// Query variable the slug is bound to (`urlKey`, `slug`, ...).
    pub variable: &'static str,
    /// Picks the matching record out of `data`, if any.
    pub extract: fn(&Value) -> Option<&Value>,
}

/// Adapter for one backend: tries each lookup step in order, first hit wins.
pub struct SourceAdapter {
    name: SourceId,
    priority: i32,
    enabled: AtomicBool,
    client: Arc<dyn QueryClient>,
    steps: Vec<LookupStep>,
    derive_metadata: MetadataFn,
    report_unreachable: bool,
}

impl SourceAdapter {
    pub fn new(
        name: impl Into<String>,
        priority: i32,
        client: Arc<dyn QueryClient>,
        steps: Vec<LookupStep>,
        derive_metadata: MetadataFn,
    ) -> Self {
        Self {
            name: SourceId::new(name),
            priority,
            enabled: AtomicBool::new(true),
            client,
            steps,
            derive_metadata,
            report_unreachable: false,
        }
    }

    pub fn renamed(mut self, name: &str) -> Self {
        self.name = SourceId::new(name);
        self
    }

    /// Report `AdapterError::Unreachable` when every step failed at transport level,
    /// instead of treating the slug as absent.
    pub fn with_report_unreachable(mut self, report: bool) -> Self {
        self.report_unreachable = report;
        self
    }

    pub fn with_enabled(self, enabled: bool) -> Self {
        self.enabled.store(enabled, Ordering::Relaxed);
        self
    }

    fn variables(step: &LookupStep, slug: &str) -> Value {
        let mut vars = Map::new();
        vars.insert(step.variable.to_string(), Value::String(slug.to_string()));
        Value::Object(vars)
    }
}

#[async_trait]
impl ContentAdapter for SourceAdapter {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    async fn resolve(&self, slug: &str) -> Result<Option<ContentEnvelope>, AdapterError> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut failed = 0usize;
        let mut last_error = None;

        for step in &self.steps {
            tracing::debug!(
                adapter = %self.name,
                entity_type = %step.entity_type,
                operation = step.query.operation,
                slug,
                "Running lookup"
            );

            let response = match self.client.query(&step.query, Self::variables(step, slug)).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(
                        adapter = %self.name,
                        entity_type = %step.entity_type,
                        error = %e,
                        "Lookup failed, trying next entity type"
                    );
                    metrics::record_lookup_failure(self.name.as_str(), step.entity_type.as_str());
                    failed += 1;
                    last_error = Some(e);
                    continue;
                }
            };

            let Some(data) = response.data.as_ref() else {
                if !response.errors.is_empty() {
                    let messages: Vec<&str> =
                        response.errors.iter().map(|e| e.message.as_str()).collect();
                    tracing::warn!(
                        adapter = %self.name,
                        entity_type = %step.entity_type,
                        errors = ?messages,
                        "Lookup returned errors without data"
                    );
                    metrics::record_lookup_failure(self.name.as_str(), step.entity_type.as_str());
                    failed += 1;
                    last_error = Some(QueryError::Backend(messages.join("; ")));
                }
                continue;
            };

            if let Some(record) = (step.extract)(data) {
                tracing::debug!(
                    adapter = %self.name,
                    entity_type = %step.entity_type,
                    slug,
                    "Lookup matched"
                );
                let metadata = (self.derive_metadata)(record);
                return Ok(Some(ContentEnvelope::new(
                    step.entity_type,
                    self.name.clone(),
                    record.clone(),
                    metadata,
                )));
            }
        }

        if self.report_unreachable && !self.steps.is_empty() && failed == self.steps.len() {
            if let Some(source) = last_error {
                return Err(AdapterError::Unreachable {
                    adapter: self.name.to_string(),
                    source,
                });
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::metadata;
    use crate::backend::{GraphQlError, QueryResponse};
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays one canned outcome per call, recording the operations queried.
    struct Replay {
        outcomes: Mutex<Vec<Result<QueryResponse, QueryError>>>,
        seen: Mutex<Vec<(String, Value)>>,
    }

    impl Replay {
        fn new(mut outcomes: Vec<Result<QueryResponse, QueryError>>) -> Arc<Self> {
            outcomes.reverse();
            Arc::new(Self {
                outcomes: Mutex::new(outcomes),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<(String, Value)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QueryClient for Replay {
        async fn query(
            &self,
            descriptor: &QueryDescriptor,
            variables: Value,
        ) -> Result<QueryResponse, QueryError> {
            self.seen
                .lock()
                .unwrap()
                .push((descriptor.operation.to_string(), variables));
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(QueryResponse::default()))
        }
    }

    fn items(data: &Value) -> Option<&Value> {
        metadata::first_record(data.get("items")?)
    }

    fn steps() -> Vec<LookupStep> {
        vec![
            LookupStep {
                entity_type: EntityType::Product,
                query: QueryDescriptor::new("Product", "query Product { items }"),
                variable: "urlKey",
                extract: items,
            },
            LookupStep {
                entity_type: EntityType::Category,
                query: QueryDescriptor::new("Category", "query Category { items }"),
                variable: "urlKey",
                extract: items,
            },
        ]
    }

    fn title_only(record: &Value) -> ContentMetadata {
        ContentMetadata {
            title: metadata::text(record, "/name"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_first_hit_wins() {
        let client = Replay::new(vec![
            Ok(QueryResponse::with_data(json!({ "items": [] }))),
            Ok(QueryResponse::with_data(json!({ "items": [{ "name": "Shoes" }, { "name": "Other" }] }))),
        ]);
        let adapter = SourceAdapter::new("shop", 10, client.clone(), steps(), title_only);

        let envelope = adapter.resolve("shoes").await.unwrap().unwrap();
        assert_eq!(envelope.entity_type, EntityType::Category);
        assert_eq!(envelope.source.as_str(), "shop");
        assert_eq!(envelope.data, json!({ "name": "Shoes" }));
        assert_eq!(envelope.metadata.unwrap().title.as_deref(), Some("Shoes"));

        let seen = client.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].1, json!({ "urlKey": "shoes" }));
    }

    #[tokio::test]
    async fn test_failed_lookup_continues() {
        let client = Replay::new(vec![
            Err(QueryError::Status(502)),
            Ok(QueryResponse::with_data(json!({ "items": [{ "name": "Shoes" }] }))),
        ]);
        let adapter = SourceAdapter::new("shop", 10, client.clone(), steps(), title_only);

        let envelope = adapter.resolve("shoes").await.unwrap().unwrap();
        assert_eq!(envelope.entity_type, EntityType::Category);
    }

    #[tokio::test]
    async fn test_all_failures_absent_by_default() {
        let client = Replay::new(vec![Err(QueryError::Status(502)), Err(QueryError::Status(503))]);
        let adapter = SourceAdapter::new("shop", 10, client, steps(), title_only);

        assert!(adapter.resolve("shoes").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_all_failures_reported_when_configured() {
        let client = Replay::new(vec![
            Err(QueryError::Status(502)),
            Ok(QueryResponse {
                data: None,
                errors: vec![GraphQlError {
                    message: "internal".into(),
                    path: Vec::new(),
                }],
            }),
        ]);
        let adapter = SourceAdapter::new("shop", 10, client, steps(), title_only)
            .with_report_unreachable(true);

        let err = adapter.resolve("shoes").await.unwrap_err();
        assert!(matches!(err, AdapterError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn test_data_with_errors_still_matches() {
        let partial = || -> Result<QueryResponse, QueryError> {
            Ok(QueryResponse {
                data: Some(json!({ "items": [{ "name": "Boots" }] })),
                errors: vec![GraphQlError {
                    message: "field 'price' unavailable".into(),
                    path: Vec::new(),
                }],
            })
        };

        let client = Replay::new(vec![partial()]);
        let adapter = SourceAdapter::new("shop", 10, client.clone(), steps(), title_only);
        let envelope = adapter.resolve("boots").await.unwrap().unwrap();
        assert_eq!(envelope.entity_type, EntityType::Product);
        assert_eq!(envelope.data, json!({ "name": "Boots" }));
        assert_eq!(client.seen().len(), 1);

        // A failed step followed by a partial hit is still a hit when reporting.
        let client = Replay::new(vec![Err(QueryError::Status(502)), partial()]);
        let adapter = SourceAdapter::new("shop", 10, client, steps(), title_only)
            .with_report_unreachable(true);
        let envelope = adapter.resolve("boots").await.unwrap().unwrap();
        assert_eq!(envelope.entity_type, EntityType::Category);
    }

    #[tokio::test]
    async fn test_partial_failure_is_absent_even_when_reporting() {
        let client = Replay::new(vec![
            Err(QueryError::Status(502)),
            Ok(QueryResponse::with_data(json!({ "items": [] }))),
        ]);
        let adapter = SourceAdapter::new("shop", 10, client, steps(), title_only)
            .with_report_unreachable(true);

        assert!(adapter.resolve("shoes").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_disabled_makes_no_calls() {
        let client = Replay::new(vec![]);
        let adapter = SourceAdapter::new("shop", 10, client.clone(), steps(), title_only)
            .with_enabled(false);

        assert!(adapter.resolve("shoes").await.unwrap().is_none());
        assert!(client.seen().is_empty());

        adapter.set_enabled(true);
        assert!(adapter.resolve("shoes").await.unwrap().is_none());
        assert_eq!(client.seen().len(), 2);
    }
}
