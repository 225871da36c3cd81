//! Tests for circuit breaker functionality

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use super::super::breaker::CircuitBreaker;
    use super::super::types::{CircuitBreakerConfig, CircuitBreakerError, CircuitState};
    use crate::error::MonitorError;

    fn three_two(timeout: Duration) -> CircuitBreaker {
        CircuitBreaker::with_config(
            "collector",
            CircuitBreakerConfig {
                failure_threshold: 3,
                success_threshold: 2,
                reset_timeout: timeout,
            },
        )
    }

    async fn fail(cb: &CircuitBreaker) -> Result<(), CircuitBreakerError<&'static str>> {
        cb.execute(|| async { Err::<(), _>("down") }).await
    }

    async fn succeed(cb: &CircuitBreaker) -> Result<(), CircuitBreakerError<&'static str>> {
        cb.execute(|| async { Ok::<(), &'static str>(()) }).await
    }

    #[tokio::test]
    async fn test_circuit_starts_closed() {
        let cb = CircuitBreaker::new("test");
        assert_eq!(cb.state(), CircuitState::Closed);
        assert!(succeed(&cb).await.is_ok());
    }

    #[tokio::test]
    async fn test_circuit_opens_after_consecutive_failures() {
        let cb = three_two(Duration::from_secs(1));

        let _ = fail(&cb).await;
        let _ = fail(&cb).await;
        assert_eq!(cb.state(), CircuitState::Closed);

        let _ = fail(&cb).await;
        assert_eq!(cb.state(), CircuitState::Open);
        assert_eq!(cb.failures(), 3);
    }

    #[tokio::test]
    async fn test_success_resets_failure_count() {
        let cb = three_two(Duration::from_secs(1));

        let _ = fail(&cb).await;
        let _ = fail(&cb).await;
        succeed(&cb).await.unwrap();
        let _ = fail(&cb).await;
        let _ = fail(&cb).await;

        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.failures(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_rejects_without_invoking() {
        let cb = three_two(Duration::from_millis(500));
        for _ in 0..3 {
            let _ = fail(&cb).await;
        }

        let invoked = Arc::new(AtomicU32::new(0));
        let counter = invoked.clone();
        tokio::time::advance(Duration::from_millis(100)).await;

        let result = cb
            .execute(|| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), &str>(())
            })
            .await;

        assert!(matches!(
            result,
            Err(CircuitBreakerError::Open {
                state: CircuitState::Open,
                failures: 3,
                ..
            })
        ));
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
        assert_eq!(cb.stats().total_rejections, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_after_timeout_then_failure_reopens() {
        let cb = three_two(Duration::from_millis(500));
        for _ in 0..3 {
            let _ = fail(&cb).await;
        }

        tokio::time::advance(Duration::from_millis(501)).await;

        let invoked = Arc::new(AtomicU32::new(0));
        let counter = invoked.clone();
        let result = cb
            .execute(|| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>("still down")
            })
            .await;

        // The call was attempted, and one failure in half-open is enough
        assert!(matches!(result, Err(CircuitBreakerError::OperationFailed("still down"))));
        assert_eq!(invoked.load(Ordering::SeqCst), 1);
        assert_eq!(cb.state(), CircuitState::Open);

        // Cooldown restarts from the half-open failure
        assert!(matches!(succeed(&cb).await, Err(CircuitBreakerError::Open { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_closes_after_success_threshold() {
        let cb = three_two(Duration::from_millis(500));
        for _ in 0..3 {
            let _ = fail(&cb).await;
        }

        tokio::time::advance(Duration::from_millis(501)).await;

        succeed(&cb).await.unwrap();
        assert_eq!(cb.state(), CircuitState::HalfOpen);

        succeed(&cb).await.unwrap();
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.failures(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_boundary_is_strict() {
        let cb = three_two(Duration::from_millis(500));
        for _ in 0..3 {
            let _ = fail(&cb).await;
        }

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(matches!(succeed(&cb).await, Err(CircuitBreakerError::Open { .. })));
    }

    #[tokio::test]
    async fn test_reset_and_trip() {
        let cb = three_two(Duration::from_secs(60));
        for _ in 0..3 {
            let _ = fail(&cb).await;
        }
        assert_eq!(cb.state(), CircuitState::Open);

        cb.reset();
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.failures(), 0);
        assert!(succeed(&cb).await.is_ok());

        cb.trip();
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(matches!(succeed(&cb).await, Err(CircuitBreakerError::Open { .. })));
    }

    #[tokio::test]
    async fn test_stats() {
        let cb = CircuitBreaker::new("test");

        succeed(&cb).await.unwrap();
        succeed(&cb).await.unwrap();
        let _ = fail(&cb).await;

        let stats = cb.stats();
        assert_eq!(stats.total_calls, 3);
        assert_eq!(stats.total_failures, 1);
        assert!(stats.last_failure.is_some());
        assert!((stats.failure_rate() - 33.33).abs() < 0.1);
    }

    #[test]
    fn test_open_error_converts_to_monitor_error() {
        let err: MonitorError = CircuitBreakerError::<MonitorError>::Open {
            component: "http".to_string(),
            state: CircuitState::Open,
            failures: 5,
        }
        .into();

        assert_eq!(
            err,
            MonitorError::CircuitOpen {
                component: "http".to_string(),
                state: "OPEN".to_string(),
                failures: 5,
            }
        );

        let inner: MonitorError =
            CircuitBreakerError::OperationFailed(MonitorError::http("boom", Some(500))).into();
        assert_eq!(inner, MonitorError::http("boom", Some(500)));
    }
}
