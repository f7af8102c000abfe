//! GraphQL-over-HTTP query client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::backend::{QueryClient, QueryDescriptor, QueryError, QueryResponse};

/// Posts query documents to a single GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl GraphQlClient {
    /// Create a client for `endpoint`.
    ///
    /// `headers` are sent with every request (e.g. a store code).
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        headers: &BTreeMap<String, String>,
    ) -> Result<Self, QueryError> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| QueryError::Client(format!("header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| QueryError::Client(format!("header '{}': {}", name, e)))?;
            default_headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| QueryError::Client(e.to_string()))?;

        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl QueryClient for GraphQlClient {
    async fn query(
        &self,
        descriptor: &QueryDescriptor,
        variables: Value,
    ) -> Result<QueryResponse, QueryError> {
        let body = json!({
            "query": descriptor.document,
            "operationName": descriptor.operation,
            "variables": variables,
        });

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(QueryError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status(status.as_u16()));
        }

        let parsed: QueryResponse = response.json().await.map_err(QueryError::Decode)?;
        for error in &parsed.errors {
            tracing::warn!(
                endpoint = %self.endpoint,
                operation = descriptor.operation,
                message = %error.message,
                "GraphQL error"
            );
        }
        Ok(parsed)
    }
}
