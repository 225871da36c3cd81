//! Circuit breaker pattern for fault tolerance
//!
//! Stops calling a chronically failing collector for a cooldown period, then
//! probes recovery with real calls in the half-open state.

mod breaker;
mod tests;
mod types;

pub use breaker::CircuitBreaker;
pub use types::{CircuitBreakerConfig, CircuitBreakerError, CircuitBreakerStats, CircuitState};
