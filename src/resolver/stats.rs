//! Aggregate resolver statistics.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::resilience::BreakerSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterSummary {
    pub name: String,
    pub enabled: bool,
    pub priority: i32,
}

/// Snapshot returned by `UrlResolver::stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverStats {
    pub cache_enabled: bool,
    pub cache_size: usize,
    /// Only adapters with recorded failures appear here.
    pub circuit_breakers: BTreeMap<String, BreakerSnapshot>,
    /// In attempt order.
    pub adapters: Vec<AdapterSummary>,
}
