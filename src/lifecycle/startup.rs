//! Startup orchestration.
//!
//! # Responsibilities
//! - Build one query client + adapter per configured backend
//! - Construct the resolver that owns cache and breakers
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Adapters are built once and live for the process lifetime

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::adapters::{cms, commerce, ContentAdapter};
use crate::backend::{GraphQlClient, QueryClient, QueryError};
use crate::config::{AdapterConfig, AdapterKind, ResolverConfig};
use crate::resolver::UrlResolver;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("adapter '{name}': invalid endpoint: {source}")]
    Endpoint {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("adapter '{name}': {source}")]
    Client {
        name: String,
        #[source]
        source: QueryError,
    },
}

/// Build one adapter from its configuration, using `client` for queries.
pub fn build_adapter(config: &AdapterConfig, client: Arc<dyn QueryClient>) -> Arc<dyn ContentAdapter> {
    let priority = config.effective_priority();
    let adapter = match config.kind {
        AdapterKind::Commerce => commerce::adapter(client, priority),
        AdapterKind::Cms => cms::adapter(client, priority),
    };
    // Configured name overrides the kind's default source id.
    let adapter = adapter
        .renamed(&config.name)
        .with_enabled(config.enabled)
        .with_report_unreachable(config.report_unreachable);

    tracing::info!(
        adapter = %config.name,
        kind = ?config.kind,
        priority,
        enabled = config.enabled,
        endpoint = %config.endpoint,
        "Adapter configured"
    );
    Arc::new(adapter)
}

/// Build adapters backed by GraphQL-over-HTTP clients.
pub fn build_adapters(config: &ResolverConfig) -> Result<Vec<Arc<dyn ContentAdapter>>, StartupError> {
    let timeout = Duration::from_secs(config.timeouts.backend_secs);

    config
        .adapters
        .iter()
        .map(|adapter| -> Result<Arc<dyn ContentAdapter>, StartupError> {
            let endpoint: Url = adapter.endpoint.parse().map_err(|source| StartupError::Endpoint {
                name: adapter.name.clone(),
                source,
            })?;
            let client = GraphQlClient::new(endpoint, timeout, &adapter.headers).map_err(|source| {
                StartupError::Client {
                    name: adapter.name.clone(),
                    source,
                }
            })?;
            Ok(build_adapter(adapter, Arc::new(client)))
        })
        .collect()
}

/// Build the resolver for a validated configuration.
pub fn build_resolver(config: &ResolverConfig) -> Result<UrlResolver, StartupError> {
    let adapters = build_adapters(config)?;
    tracing::info!(
        adapters = adapters.len(),
        cache_enabled = config.cache.enabled,
        cache_ttl_secs = config.cache.ttl_secs,
        breaker_enabled = config.circuit_breaker.enabled,
        breaker_threshold = config.circuit_breaker.failure_threshold,
        "Resolver initialized"
    );
    Ok(UrlResolver::from_config(config, adapters))
}
