//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check adapter names are unique and endpoints parse
//! - Validate value ranges (TTL, threshold, timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::ResolverConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("adapter #{0} has an empty name")]
    EmptyAdapterName(usize),

    #[error("duplicate adapter name '{0}'")]
    DuplicateAdapter(String),

    #[error("adapter '{name}' has invalid endpoint '{endpoint}'")]
    InvalidEndpoint { name: String, endpoint: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} is not a valid socket address: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("unknown log format '{0}' (expected 'pretty' or 'json')")]
    UnknownLogFormat(String),
}

pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for (i, adapter) in config.adapters.iter().enumerate() {
        if adapter.name.trim().is_empty() {
            errors.push(ValidationError::EmptyAdapterName(i));
        } else if !seen.insert(adapter.name.as_str()) {
            errors.push(ValidationError::DuplicateAdapter(adapter.name.clone()));
        }

        let endpoint_ok = Url::parse(&adapter.endpoint)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !endpoint_ok {
            errors.push(ValidationError::InvalidEndpoint {
                name: adapter.name.clone(),
                endpoint: adapter.endpoint.clone(),
            });
        }
    }

    if config.cache.enabled && config.cache.ttl_secs == 0 {
        errors.push(ValidationError::Zero { field: "cache.ttl_secs" });
    }
    if config.circuit_breaker.enabled {
        if config.circuit_breaker.failure_threshold == 0 {
            errors.push(ValidationError::Zero {
                field: "circuit_breaker.failure_threshold",
            });
        }
        if config.circuit_breaker.cool_down_secs == 0 {
            errors.push(ValidationError::Zero {
                field: "circuit_breaker.cool_down_secs",
            });
        }
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }
    if config.timeouts.backend_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.backend_secs" });
    }

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.admin.enabled {
        check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if !matches!(config.observability.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::UnknownLogFormat(
            config.observability.log_format.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
