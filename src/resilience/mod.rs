//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver about to call an adapter:
//!     → circuit_breaker.rs (open? skip adapter, no call made)
//!     → adapter call
//!     → On Err: record failure (may open breaker)
//!     → On hit: reset breaker
//! ```
//!
//! # Design Decisions
//! - Breaker state is owned by the resolver; adapters never see it
//! - No timers: state transitions are evaluated lazily at the point of use
//! - Timeouts belong to callers and to the backend transport, not here

pub mod circuit_breaker;

pub use circuit_breaker::{BreakerRegistry, BreakerSnapshot, BreakerState};
