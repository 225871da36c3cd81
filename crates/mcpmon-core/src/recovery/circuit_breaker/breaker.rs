//! Circuit breaker implementation

use parking_lot::Mutex;
use std::future::Future;
use tokio::time::Instant;

use super::types::{CircuitBreakerConfig, CircuitBreakerError, CircuitBreakerStats, CircuitState};

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    /// Consecutive failures since the last reset
    failures: u32,
    /// Consecutive successes while half-open
    successes: u32,
    last_failure: Option<Instant>,
    total_calls: u64,
    total_failures: u64,
    total_rejections: u64,
}

impl BreakerState {
    fn closed() -> Self {
        Self {
            state: CircuitState::Closed,
            failures: 0,
            successes: 0,
            last_failure: None,
            total_calls: 0,
            total_failures: 0,
            total_rejections: 0,
        }
    }
}

/// Circuit breaker guarding a single downstream
///
/// The lock is only held for bookkeeping, never across the guarded call.
pub struct CircuitBreaker {
    /// Component name (for logging)
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with default config
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, CircuitBreakerConfig::default())
    }

    /// Create a new circuit breaker with custom config
    pub fn with_config(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerState::closed()),
        }
    }

    /// Get the component name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Current state, without applying the open-timeout transition
    ///
    /// An open circuit only moves to half-open when a call is attempted.
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    /// Consecutive failure count
    pub fn failures(&self) -> u32 {
        self.inner.lock().failures
    }

    /// Execute an operation with circuit breaker protection
    pub async fn execute<T, E, F, Fut>(&self, operation: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.acquire::<E>()?;

        match operation().await {
            Ok(value) => {
                self.on_success();
                Ok(value)
            }
            Err(e) => {
                self.on_failure();
                Err(CircuitBreakerError::OperationFailed(e))
            }
        }
    }

    /// Get circuit breaker statistics
    pub fn stats(&self) -> CircuitBreakerStats {
        let inner = self.inner.lock();
        CircuitBreakerStats {
            state: inner.state,
            failures: inner.failures,
            successes: inner.successes,
            total_calls: inner.total_calls,
            total_failures: inner.total_failures,
            total_rejections: inner.total_rejections,
            last_failure: inner.last_failure,
        }
    }

    /// Force the circuit closed with all counters zeroed
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.state = CircuitState::Closed;
        inner.failures = 0;
        inner.successes = 0;
        inner.last_failure = None;

        tracing::info!(circuit = %self.name, "Circuit breaker reset");
    }

    /// Force the circuit open, starting the cooldown now
    pub fn trip(&self) {
        let mut inner = self.inner.lock();
        inner.state = CircuitState::Open;
        inner.successes = 0;
        inner.last_failure = Some(Instant::now());

        tracing::warn!(
            circuit = %self.name,
            failures = inner.failures,
            "Circuit breaker tripped manually"
        );
    }

    /// Admit or reject a call, moving an expired open circuit to half-open
    fn acquire<E>(&self) -> Result<(), CircuitBreakerError<E>> {
        let mut inner = self.inner.lock();

        if inner.state == CircuitState::Open {
            let expired = inner
                .last_failure
                .map(|at| at.elapsed() > self.config.reset_timeout)
                .unwrap_or(true);

            if expired {
                inner.state = CircuitState::HalfOpen;
                inner.successes = 0;
                tracing::info!(
                    circuit = %self.name,
                    failures = inner.failures,
                    "Circuit breaker transitioning to HALF_OPEN"
                );
            } else {
                inner.total_rejections += 1;
                return Err(CircuitBreakerError::Open {
                    component: self.name.clone(),
                    state: inner.state,
                    failures: inner.failures,
                });
            }
        }

        inner.total_calls += 1;
        Ok(())
    }

    fn on_success(&self) {
        let mut inner = self.inner.lock();
        inner.failures = 0;

        if inner.state == CircuitState::HalfOpen {
            inner.successes += 1;
            if inner.successes >= self.config.success_threshold {
                inner.state = CircuitState::Closed;
                inner.successes = 0;
                tracing::info!(
                    circuit = %self.name,
                    successes = self.config.success_threshold,
                    "Circuit breaker transitioning to CLOSED"
                );
            }
        }
    }

    fn on_failure(&self) {
        let mut inner = self.inner.lock();
        inner.failures += 1;
        inner.total_failures += 1;
        inner.last_failure = Some(Instant::now());

        let should_open = match inner.state {
            CircuitState::HalfOpen => true,
            CircuitState::Closed => inner.failures >= self.config.failure_threshold,
            CircuitState::Open => false,
        };

        if should_open {
            inner.state = CircuitState::Open;
            inner.successes = 0;
            tracing::warn!(
                circuit = %self.name,
                failures = inner.failures,
                threshold = self.config.failure_threshold,
                "Circuit breaker transitioning to OPEN"
            );
        }
    }
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("state", &self.state())
            .finish()
    }
}
