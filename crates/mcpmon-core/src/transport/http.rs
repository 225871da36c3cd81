//! HTTP transport: JSON batches posted to the metrics server

use super::Transport;
use crate::config::ValidatedMonitorOptions;
use crate::error::{MonitorError, MonitorResult};
use crate::event::ToolCallEvent;
use crate::recovery::{CircuitBreaker, CircuitBreakerConfig, RetryConfig, RetryExecutor};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

/// Header carrying the metrics API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Posts batches to the metrics server
///
/// Each send runs the retry loop inside the circuit breaker, so an open
/// circuit fails fast without touching the network and a single exhausted
/// retry loop counts as one breaker failure.
pub struct HttpTransport {
    url: String,
    api_key: Option<String>,
    timeout: Duration,
    http_client: Client,
    retry: RetryExecutor,
    circuit_breaker: CircuitBreaker,
}

impl HttpTransport {
    /// Create a transport with the default retry and breaker settings
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        retry_attempts: u32,
    ) -> Self {
        Self {
            url: url.into(),
            api_key,
            timeout,
            http_client: Client::new(),
            retry: RetryExecutor::new(RetryConfig::default().with_max_attempts(retry_attempts)),
            circuit_breaker: CircuitBreaker::with_config(
                "http-transport",
                CircuitBreakerConfig::default(),
            ),
        }
    }

    /// Create a transport from validated monitor options
    pub fn from_options(options: &ValidatedMonitorOptions) -> Self {
        Self::new(
            options.metrics_server_url.clone(),
            Some(options.api_key.clone()),
            options.timeout,
            options.retry_attempts,
        )
    }

    /// Use a caller-supplied HTTP client
    pub fn with_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Replace the retry settings
    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retry = RetryExecutor::new(config);
        self
    }

    /// Replace the circuit breaker settings
    pub fn with_circuit_breaker_config(mut self, config: CircuitBreakerConfig) -> Self {
        self.circuit_breaker = CircuitBreaker::with_config("http-transport", config);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The breaker guarding this transport, for diagnostics and `reset()`
    pub fn circuit_breaker(&self) -> &CircuitBreaker {
        &self.circuit_breaker
    }

    /// One POST attempt, bounded by the configured timeout, no retry
    #[instrument(skip(self, events), fields(event_count = events.len()), level = "debug")]
    async fn post_batch(&self, events: &[ToolCallEvent]) -> MonitorResult<()> {
        let mut request = self
            .http_client
            .post(&self.url)
            .timeout(self.timeout)
            .json(events);

        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitorError::http(
                format!("metrics server responded {}: {}", status, truncate(&body, 256)),
                Some(status.as_u16()),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, events: &[ToolCallEvent]) -> MonitorResult<()> {
        let result = self
            .circuit_breaker
            .execute(|| self.retry.run(|| self.post_batch(events)))
            .await;

        match result {
            Ok(()) => {
                tracing::info!(
                    event_count = events.len(),
                    url = %self.url,
                    "Metrics sent successfully"
                );
                Ok(())
            }
            Err(e) => {
                let original: MonitorError = e.into();
                tracing::error!(
                    error = %original,
                    retryable = original.is_retryable(),
                    event_count = events.len(),
                    url = %self.url,
                    "Failed to send metrics"
                );
                Err(MonitorError::transport(
                    self.url.clone(),
                    events.len(),
                    original.to_string(),
                ))
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("retry", self.retry.config())
            .field("circuit_breaker", &self.circuit_breaker)
            .finish()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
