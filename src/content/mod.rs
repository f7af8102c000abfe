//! Content data model.
//!
//! # Data Flow
//! ```text
//! slug + ResolveContext
//!     → resolver (cache | adapters)
//!     → adapter hit: backend record → ContentEnvelope { type, source, data, metadata }
//!     → rendering / API collaborators
//! ```
//!
//! # Design Decisions
//! - Envelopes are built by adapters only, after a successful lookup
//! - `data` stays opaque JSON; only metadata is derived from it
//! - Source identifiers are open-ended so new backends register their own

pub mod types;

pub use types::{ContentEnvelope, ContentMetadata, EntityType, ResolveContext, SourceId};
