//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ResolverConfig (validated, immutable)
//!     → lifecycle::startup builds adapters + resolver once
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; adapters live for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdapterConfig, AdapterKind, AdminConfig, CacheConfig, CircuitBreakerConfig, ListenerConfig,
    ObservabilityConfig, ResolverConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
