//! Validation of monitor options

use super::defaults::*;
use super::options::{MonitorOptions, ValidatedMonitorOptions};
use crate::error::{MonitorError, MonitorResult};
use crate::logging::LogLevel;
use reqwest::Url;
use std::time::Duration;

/// Validate options and apply defaults
///
/// Malformed input is rejected, never coerced.
pub fn validate_monitor_options(options: &MonitorOptions) -> MonitorResult<ValidatedMonitorOptions> {
    let api_key = match options.api_key.as_deref() {
        Some(key) if key.len() >= MIN_API_KEY_LEN => key.to_string(),
        Some(key) => {
            return Err(MonitorError::config_with_context(
                "Invalid monitor options configuration",
                format!(
                    "apiKey must be at least {} characters, got {}",
                    MIN_API_KEY_LEN,
                    key.len()
                ),
            ));
        }
        None => {
            return Err(MonitorError::config_with_context(
                "Invalid monitor options configuration",
                "apiKey is required",
            ));
        }
    };

    let metrics_server_url = match options.metrics_server_url.as_deref() {
        Some(raw) => validate_url(raw)?,
        None => DEFAULT_METRICS_SERVER_URL.to_string(),
    };

    let batch_size = options.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
    if batch_size == 0 {
        return Err(invalid("batchSize must be positive"));
    }

    let timeout_ms = options.timeout.unwrap_or(DEFAULT_TIMEOUT_MS);
    if timeout_ms == 0 {
        return Err(invalid("timeout must be positive"));
    }

    let log_level = match options.log_level.as_deref() {
        Some(raw) => raw.parse::<LogLevel>()?,
        None => LogLevel::Info,
    };

    if let Some(max_pending) = options.max_pending {
        if max_pending < batch_size {
            return Err(invalid(format!(
                "maxPending ({}) must be at least batchSize ({})",
                max_pending, batch_size
            )));
        }
    }

    Ok(ValidatedMonitorOptions {
        api_key,
        metrics_server_url,
        batch_size,
        log_level,
        timeout: Duration::from_millis(timeout_ms),
        retry_attempts: options.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS),
        max_pending: options.max_pending,
    })
}

fn validate_url(raw: &str) -> MonitorResult<String> {
    let url = Url::parse(raw)
        .map_err(|e| invalid(format!("metricsServerUrl is not a valid URL ({}): {}", e, raw)))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(invalid(format!(
            "metricsServerUrl must use http or https, got {}",
            other
        ))),
    }
}

fn invalid(context: impl Into<String>) -> MonitorError {
    MonitorError::config_with_context("Invalid monitor options configuration", context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> String {
        "a".repeat(64)
    }

    #[test]
    fn test_defaults_applied() {
        let validated = validate_monitor_options(&MonitorOptions::new(key())).unwrap();

        assert_eq!(validated.metrics_server_url, "http://localhost:8000/v1/metrics");
        assert_eq!(validated.batch_size, 10);
        assert_eq!(validated.timeout, Duration::from_millis(5000));
        assert_eq!(validated.retry_attempts, 2);
        assert_eq!(validated.log_level, LogLevel::Info);
        assert_eq!(validated.max_pending, None);
    }

    #[test]
    fn test_missing_or_short_api_key() {
        let err = validate_monitor_options(&MonitorOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");

        let err = validate_monitor_options(&MonitorOptions::new("short")).unwrap_err();
        match err {
            MonitorError::Configuration { context, .. } => {
                assert!(context.unwrap().contains("at least 64"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            MonitorOptions::new(key()).with_batch_size(0),
            MonitorOptions::new(key()).with_timeout_ms(0),
            MonitorOptions::new(key()).with_log_level("verbose"),
            MonitorOptions::new(key()).with_metrics_server_url("not a url"),
            MonitorOptions::new(key()).with_metrics_server_url("ftp://example.com/metrics"),
            MonitorOptions::new(key()).with_batch_size(20).with_max_pending(5),
        ];

        for options in bad {
            assert!(
                validate_monitor_options(&options).is_err(),
                "expected rejection for {:?}",
                options
            );
        }
    }

    #[test]
    fn test_explicit_values_kept() {
        let options = MonitorOptions::new(key())
            .with_metrics_server_url("https://metrics.example.com/v1/metrics")
            .with_batch_size(25)
            .with_timeout_ms(1500)
            .with_retry_attempts(0)
            .with_log_level("silent")
            .with_max_pending(100);

        let validated = validate_monitor_options(&options).unwrap();
        assert_eq!(validated.metrics_server_url, "https://metrics.example.com/v1/metrics");
        assert_eq!(validated.batch_size, 25);
        assert_eq!(validated.timeout, Duration::from_millis(1500));
        assert_eq!(validated.retry_attempts, 0);
        assert_eq!(validated.log_level, LogLevel::Silent);
        assert_eq!(validated.max_pending, Some(100));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let validated = validate_monitor_options(&MonitorOptions::new(format!("{}wxyz", "a".repeat(60)))).unwrap();
        let debug = format!("{:?}", validated);
        assert!(debug.contains("****wxyz"));
        assert!(!debug.contains(&"a".repeat(60)));
    }
}
