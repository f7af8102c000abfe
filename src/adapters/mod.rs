//! Content source adapters.
//!
//! # Data Flow
//! ```text
//! slug
//!     → source.rs (walk the ordered lookup list)
//!         → QueryClient per step (product? category? page?)
//!         → first non-empty record wins
//!     → metadata derivation (commerce.rs / cms.rs)
//!     → ContentEnvelope | absent
//! ```
//!
//! # Design Decisions
//! - One generic adapter type; backends differ only in lookup list and metadata
//! - A failed lookup never aborts the remaining entity types
//! - Adapters are stateless per request; only the enabled flag is mutable

pub mod cms;
pub mod commerce;
pub mod metadata;
pub mod source;

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::QueryError;
use crate::content::ContentEnvelope;

pub use source::{LookupStep, SourceAdapter};

/// Failure of an adapter as a whole (as opposed to "no content").
///
/// The resolver counts these against the adapter's circuit breaker.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Every lookup failed before reaching the backend.
    #[error("backend '{adapter}' unreachable: {source}")]
    Unreachable {
        adapter: String,
        #[source]
        source: QueryError,
    },

    /// Adapter-specific failure.
    #[error("adapter failure: {0}")]
    Failed(String),
}

/// A strategy that asks one backend whether it owns a slug.
#[async_trait]
pub trait ContentAdapter: Send + Sync {
    /// Unique, stable name; also the `source` of envelopes it builds.
    fn name(&self) -> &str;

    /// Higher priority is attempted first.
    fn priority(&self) -> i32;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&self, enabled: bool);

    /// Look the slug up. `Ok(None)` means the backend has no such content.
    async fn resolve(&self, slug: &str) -> Result<Option<ContentEnvelope>, AdapterError>;
}
