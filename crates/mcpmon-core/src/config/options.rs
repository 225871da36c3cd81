//! Raw and validated option types

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Monitor options as supplied by the caller
///
/// Every field except the API key has a default; the API key is optional here
/// only so that a missing key is reported by validation with a clear message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MonitorOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Per-attempt HTTP timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<u32>,
    /// Hard cap on buffered events; unset means the buffer only has the soft trigger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pending: Option<usize>,
}

impl MonitorOptions {
    /// Options with only the API key set
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    pub fn with_metrics_server_url(mut self, url: impl Into<String>) -> Self {
        self.metrics_server_url = Some(url.into());
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout = Some(timeout_ms);
        self
    }

    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = Some(attempts);
        self
    }

    pub fn with_max_pending(mut self, max_pending: usize) -> Self {
        self.max_pending = Some(max_pending);
        self
    }

    /// Fill unset fields from `other`
    pub fn merge(mut self, other: MonitorOptions) -> Self {
        self.api_key = self.api_key.or(other.api_key);
        self.metrics_server_url = self.metrics_server_url.or(other.metrics_server_url);
        self.batch_size = self.batch_size.or(other.batch_size);
        self.log_level = self.log_level.or(other.log_level);
        self.timeout = self.timeout.or(other.timeout);
        self.retry_attempts = self.retry_attempts.or(other.retry_attempts);
        self.max_pending = self.max_pending.or(other.max_pending);
        self
    }
}

/// Options after validation, with every default applied
#[derive(Clone, PartialEq)]
pub struct ValidatedMonitorOptions {
    pub api_key: String,
    pub metrics_server_url: String,
    pub batch_size: usize,
    pub log_level: LogLevel,
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub max_pending: Option<usize>,
}

impl ValidatedMonitorOptions {
    /// API key with everything but the last four characters hidden
    pub fn masked_api_key(&self) -> String {
        let tail: String = self
            .api_key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{}", tail)
    }
}

impl std::fmt::Debug for ValidatedMonitorOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedMonitorOptions")
            .field("api_key", &self.masked_api_key())
            .field("metrics_server_url", &self.metrics_server_url)
            .field("batch_size", &self.batch_size)
            .field("log_level", &self.log_level)
            .field("timeout", &self.timeout)
            .field("retry_attempts", &self.retry_attempts)
            .field("max_pending", &self.max_pending)
            .finish()
    }
}
