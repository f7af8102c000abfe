//! Content resolution library: decides which backend owns a storefront slug.

pub mod adapters;
pub mod admin;
pub mod backend;
pub mod config;
pub mod content;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod resolver;

pub use config::ResolverConfig;
pub use content::{ContentEnvelope, EntityType, ResolveContext};
pub use http::HttpServer;
pub use resolver::UrlResolver;
