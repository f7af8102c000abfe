//! Content resolution subsystem.
//!
//! # Data Flow
//! ```text
//! resolve(slug, context)
//!     → cache.rs (live hit? return it, no backend calls)
//!     → engine.rs (enabled adapters, descending priority)
//!         → breaker open? skip
//!         → adapter.resolve(slug)
//!             hit  → cache write, breaker reset, return
//!             none → next adapter
//!             Err  → breaker failure, next adapter
//!     → None (caller renders not-found)
//! ```
//!
//! # Design Decisions
//! - Sequential, short-circuiting search: first confident match wins
//! - Priority encodes which backend owns ambiguous slugs
//! - Resolver is an explicit object injected at startup, not a global
//! - Concurrent requests for the same uncached slug may both hit backends

pub mod cache;
pub mod engine;
pub mod stats;

pub use cache::ResolutionCache;
pub use engine::UrlResolver;
pub use stats::{AdapterSummary, ResolverStats};
