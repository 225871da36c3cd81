//! Failure isolation for the delivery path
//!
//! - Exponential backoff for spacing out retries
//! - A retry executor that re-raises the last error once attempts run out
//! - A circuit breaker that stops calling a chronically failing collector

pub mod backoff;
pub mod circuit_breaker;
pub mod retry;

pub use backoff::ExponentialBackoff;
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerStats, CircuitState};
pub use retry::{RetryConfig, RetryExecutor, with_retry};
