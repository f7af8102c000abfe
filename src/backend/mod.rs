//! Outbound backend query capability.
//!
//! # Data Flow
//! ```text
//! adapter lookup step
//!     → QueryClient::query(descriptor, variables)
//!     → graphql.rs (POST {query, operationName, variables})
//!     → QueryResponse { data?, errors[] } | QueryError
//! ```
//!
//! # Design Decisions
//! - Adapters depend on the `QueryClient` trait only, never on transport
//! - Partial responses (data + errors) are returned as-is; callers decide
//! - Timeouts surface as transport errors

pub mod graphql;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use graphql::GraphQlClient;

/// A named query document understood by one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDescriptor {
    /// Operation name, used for logging and `operationName`.
    pub operation: &'static str,
    /// Query document text; opaque to the resolver.
    pub document: &'static str,
}

impl QueryDescriptor {
    pub const fn new(operation: &'static str, document: &'static str) -> Self {
        Self { operation, document }
    }
}

/// An error entry reported by the backend alongside (or instead of) data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
}

/// Response body of a backend query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl QueryResponse {
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }
}

/// Errors raised while querying a backend.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Connection, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {0}")]
    Status(u16),

    /// Response body was not a valid query response.
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),

    /// Backend reported errors and returned no data.
    #[error("backend error: {0}")]
    Backend(String),

    /// Client could not be constructed (bad header, TLS setup).
    #[error("client setup failed: {0}")]
    Client(String),
}

/// Capability to run a query against one backend.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn query(
        &self,
        descriptor: &QueryDescriptor,
        variables: Value,
    ) -> Result<QueryResponse, QueryError>;
}
