//! Retry executor with exponential backoff
//!
//! Runs a fallible async operation up to `max_attempts` times. There is no
//! delay before the first attempt; after each failed attempt except the last
//! the executor sleeps for the backoff delay. The error of the final attempt
//! is returned to the caller unchanged.

use super::backoff::ExponentialBackoff;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Configuration for retry behavior
///
/// # Example
/// ```
/// use mcpmon_core::recovery::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::default()
///     .with_max_attempts(5)
///     .with_initial_delay(Duration::from_millis(200))
///     .with_max_delay(Duration::from_secs(10));
/// assert_eq!(config.max_attempts, 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Factor applied to the delay after each failed attempt
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a new RetryConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max attempts
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set initial delay before the first retry
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set maximum delay between retries
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set backoff multiplier
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Create an ExponentialBackoff from this config
    pub fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff::new(self.initial_delay, self.max_delay, self.backoff_multiplier)
    }
}

/// Retry executor for async operations
pub struct RetryExecutor {
    config: RetryConfig,
    backoff: ExponentialBackoff,
}

impl RetryExecutor {
    /// Create a new executor using the config's exponential backoff
    pub fn new(config: RetryConfig) -> Self {
        let backoff = config.create_backoff();
        Self { config, backoff }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute an operation with retries
    ///
    /// A `max_attempts` of zero still runs the operation once.
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt: u32 = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt >= max_attempts {
                        tracing::error!(
                            attempts = attempt,
                            max_attempts,
                            error = %error,
                            "Retry attempts exhausted"
                        );
                        return Err(error);
                    }

                    let delay = self.backoff.delay_for_attempt(attempt - 1);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Operation failed, retrying"
                    );

                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

/// Convenience function to retry an async operation with a one-off config
pub async fn with_retry<T, E, F, Fut>(config: RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    RetryExecutor::new(config).run(operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn assert_delay(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(5),
            "expected ~{:?}, got {:?}",
            expected,
            actual
        );
    }

    fn doubling_config() -> RetryConfig {
        RetryConfig::new()
            .with_max_attempts(3)
            .with_initial_delay(Duration::from_millis(100))
            .with_backoff_multiplier(2.0)
            .with_max_delay(Duration::from_millis(1000))
    }

    #[tokio::test]
    async fn test_retry_success_immediately() {
        let result: Result<i32, String> = with_retry(doubling_config(), || async { Ok(42) }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_success_on_third_attempt_with_backoff() {
        let attempt_times = Arc::new(Mutex::new(Vec::new()));
        let times = attempt_times.clone();
        let start = Instant::now();

        let result: Result<&str, String> = with_retry(doubling_config(), || {
            let times = times.clone();
            async move {
                let mut times = times.lock();
                times.push(start.elapsed());
                if times.len() < 3 {
                    Err(format!("attempt {} failed", times.len()))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result, Ok("done"));
        let times = attempt_times.lock();
        assert_eq!(times.len(), 3);
        assert_eq!(times[0], Duration::ZERO);
        assert_delay(times[1] - times[0], Duration::from_millis(100));
        assert_delay(times[2] - times[1], Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhausted_returns_last_error_without_trailing_delay() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        let start = Instant::now();

        let result: Result<(), String> = with_retry(doubling_config(), || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Err(format!("failure {}", n))
            }
        })
        .await;

        assert_eq!(result, Err("failure 3".to_string()));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // 100 + 200 and nothing after the last attempt
        assert_delay(start.elapsed(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_capped() {
        let config = RetryConfig::new()
            .with_max_attempts(4)
            .with_initial_delay(Duration::from_millis(400))
            .with_max_delay(Duration::from_millis(500));
        let start = Instant::now();

        let result: Result<(), &str> = with_retry(config, || async { Err("nope") }).await;

        assert!(result.is_err());
        // 400 + 500 + 500
        assert_delay(start.elapsed(), Duration::from_millis(1400));
    }

    #[tokio::test]
    async fn test_zero_attempts_runs_once() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: Result<(), &str> = with_retry(RetryConfig::new().with_max_attempts(0), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err("nope")
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
