//! Metrics collection and exposition.
//!
//! # Metrics
//! - `resolver_requests_total` (counter): resolutions by outcome (hit, cache, miss)
//! - `resolver_resolve_duration_seconds` (histogram): end-to-end resolve latency
//! - `resolver_cache_events_total` (counter): cache hit / miss / expired reads
//! - `resolver_cache_entries` (gauge): current cache size
//! - `resolver_adapter_failures_total` (counter): adapter errors by adapter
//! - `resolver_lookup_failures_total` (counter): failed lookups by adapter, entity type
//! - `resolver_breaker_skips_total` (counter): attempts skipped by an open breaker
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exporter is opt-in via configuration

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(outcome: &'static str, elapsed: Duration) {
    counter!("resolver_requests_total", "outcome" => outcome).increment(1);
    histogram!("resolver_resolve_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_cache_event(event: &'static str) {
    counter!("resolver_cache_events_total", "event" => event).increment(1);
}

pub fn record_cache_size(size: usize) {
    gauge!("resolver_cache_entries").set(size as f64);
}

pub fn record_adapter_failure(adapter: &str) {
    counter!("resolver_adapter_failures_total", "adapter" => adapter.to_string()).increment(1);
}

pub fn record_lookup_failure(adapter: &str, entity_type: &'static str) {
    counter!(
        "resolver_lookup_failures_total",
        "adapter" => adapter.to_string(),
        "entity_type" => entity_type
    )
    .increment(1);
}

pub fn record_breaker_skip(adapter: &str) {
    counter!("resolver_breaker_skips_total", "adapter" => adapter.to_string()).increment(1);
}
