//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the resolver.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::adapters::{cms, commerce};

/// Root configuration for the content resolver service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Resolution cache settings.
    pub cache: CacheConfig,

    /// Circuit breaker settings.
    pub circuit_breaker: CircuitBreakerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub admin: AdminConfig,

    /// Content backends, registered in this order.
    pub adapters: Vec<AdapterConfig>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            cache: CacheConfig::default(),
            circuit_breaker: CircuitBreakerConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            admin: AdminConfig::default(),
            adapters: default_adapters(),
        }
    }
}

fn default_adapters() -> Vec<AdapterConfig> {
    let mut commerce_headers = BTreeMap::new();
    commerce_headers.insert("Store".to_string(), "default".to_string());

    vec![
        AdapterConfig {
            name: commerce::SOURCE.to_string(),
            kind: AdapterKind::Commerce,
            endpoint: "http://localhost/graphql".to_string(),
            priority: None,
            enabled: true,
            headers: commerce_headers,
            report_unreachable: false,
        },
        AdapterConfig {
            name: cms::SOURCE.to_string(),
            kind: AdapterKind::Cms,
            endpoint: "http://localhost:1337/graphql".to_string(),
            priority: None,
            enabled: true,
            headers: BTreeMap::new(),
            report_unreachable: false,
        },
    ]
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Resolution cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Entry lifetime in seconds.
    pub ttl_secs: u64,

    /// Maximum cached slugs; 0 means unbounded.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300,
            max_entries: 10_000,
        }
    }
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    pub enabled: bool,

    /// Consecutive adapter failures before the breaker opens.
    pub failure_threshold: u32,

    /// How long an open breaker skips the adapter, in seconds.
    pub cool_down_secs: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            failure_threshold: 3,
            cool_down_secs: 30,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time for an inbound HTTP request in seconds.
    pub request_secs: u64,

    /// Time allowed for a single backend query in seconds.
    pub backend_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            backend_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Which built-in lookup list an adapter uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    /// Product, category, CMS page.
    Commerce,
    /// Article, page.
    Cms,
}

impl AdapterKind {
    pub fn default_priority(&self) -> i32 {
        match self {
            AdapterKind::Commerce => commerce::DEFAULT_PRIORITY,
            AdapterKind::Cms => cms::DEFAULT_PRIORITY,
        }
    }
}

/// One content backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdapterConfig {
    /// Unique adapter name; also the `source` of its envelopes.
    pub name: String,

    pub kind: AdapterKind,

    /// GraphQL endpoint URL.
    pub endpoint: String,

    /// Attempt priority (higher = tried first). Defaults per kind.
    #[serde(default)]
    pub priority: Option<i32>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Extra headers sent with every query.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Count an all-lookups-failed outcome against the circuit breaker.
    #[serde(default)]
    pub report_unreachable: bool,
}

impl AdapterConfig {
    pub fn effective_priority(&self) -> i32 {
        self.priority.unwrap_or_else(|| self.kind.default_priority())
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ResolverConfig = toml::from_str("").unwrap();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.circuit_breaker.failure_threshold, 3);
        assert_eq!(config.circuit_breaker.cool_down_secs, 30);

        let names: Vec<&str> = config.adapters.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["magento", "strapi"]);
        assert_eq!(config.adapters[0].effective_priority(), 100);
        assert_eq!(config.adapters[1].effective_priority(), 50);
    }

    #[test]
    fn test_adapter_section() {
        let config: ResolverConfig = toml::from_str(
            r#"
            [cache]
            enabled = false

            [[adapters]]
            name = "blog"
            kind = "cms"
            endpoint = "https://cms.example.com/graphql"
            priority = 120
            headers = { Authorization = "Bearer t" }
            "#,
        )
        .unwrap();

        assert!(!config.cache.enabled);
        assert_eq!(config.adapters.len(), 1);
        let blog = &config.adapters[0];
        assert_eq!(blog.kind, AdapterKind::Cms);
        assert_eq!(blog.effective_priority(), 120);
        assert!(blog.enabled);
        assert_eq!(blog.headers["Authorization"], "Bearer t");
    }
}
