//! Backoff delays for retry operations

use std::time::Duration;

/// Exponential backoff capped at a maximum delay
///
/// The delay after failed attempt `n` is `initial * multiplier^n`, never more
/// than `max_delay`. No jitter is applied so delays are reproducible.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
}

impl ExponentialBackoff {
    pub fn new(initial_delay: Duration, max_delay: Duration, multiplier: f64) -> Self {
        Self {
            initial_delay,
            max_delay,
            multiplier,
        }
    }

    /// Delay to wait after the given failed attempt (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_nanos() as f64 * self.multiplier.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_nanos() as f64).max(0.0);
        Duration::from_nanos(capped.round() as u64)
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(10_000), 2.0)
    }
}
