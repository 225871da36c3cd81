//! Retry and circuit breaker simulation
//!
//! Runs a flaky operation through the retry executor, then keeps failing
//! until the circuit breaker opens and starts rejecting calls outright.

use mcpmon_core::MonitorError;
use mcpmon_core::recovery::{CircuitBreaker, CircuitBreakerConfig, RetryConfig, RetryExecutor};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let retry = RetryExecutor::new(
        RetryConfig::default()
            .with_max_attempts(4)
            .with_initial_delay(Duration::from_millis(50))
            .with_max_delay(Duration::from_millis(200)),
    );

    println!("Retry: succeeds on the third attempt");
    let attempts = AtomicU32::new(0);
    let value = retry
        .run(|| async {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(MonitorError::http(format!("attempt {} refused", n), Some(503)))
            } else {
                Ok(n)
            }
        })
        .await?;
    println!("  succeeded after {} attempts", value);

    println!("\nCircuit breaker: threshold 3, reset after 500ms");
    let breaker = CircuitBreaker::with_config(
        "simulation",
        CircuitBreakerConfig {
            failure_threshold: 3,
            success_threshold: 1,
            reset_timeout: Duration::from_millis(500),
        },
    );

    for call in 1..=5 {
        let result = breaker
            .execute(|| async { Err::<(), _>(MonitorError::http("collector down", Some(500))) })
            .await;
        println!("  call {}: {} (state {})", call, describe(result), breaker.state());
    }

    tokio::time::sleep(Duration::from_millis(600)).await;
    let result = breaker.execute(|| async { Ok::<_, MonitorError>(()) }).await;
    println!("  after reset timeout: {} (state {})", describe(result), breaker.state());
    println!("  stats: {:?}", breaker.stats());

    Ok(())
}

fn describe<T, E: std::fmt::Display>(result: Result<T, E>) -> String {
    match result {
        Ok(_) => "ok".to_string(),
        Err(e) => e.to_string(),
    }
}
