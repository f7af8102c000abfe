//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver, adapters, HTTP layer produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (adapter, slug, entity_type) on every event
//! - Request ID flows from the HTTP layer via `x-request-id`
//! - Metrics are cheap and no-ops unless an exporter is installed

pub mod logging;
pub mod metrics;
