//! Core error type for the telemetry pipeline

use thiserror::Error;

/// Result type alias for mcpmon operations
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Main error type for mcpmon
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonitorError {
    /// Malformed options, fatal at construction
    #[error("Configuration error: {message}{}", context_suffix(.context))]
    Configuration {
        message: String,
        context: Option<String>,
    },

    /// Delivery failed after the retry and circuit breaker composition
    #[error("Transport error: failed to deliver {event_count} events to {url}: {original_error}")]
    Transport {
        url: String,
        event_count: usize,
        original_error: String,
    },

    /// Fast failure while the circuit is open
    #[error("Circuit breaker is {state} for {component} after {failures} failures")]
    CircuitOpen {
        component: String,
        state: String,
        failures: u32,
    },

    /// Malformed event payload
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Hard buffer capacity reached
    #[error("Buffer overflow: {pending} events pending, capacity {capacity}")]
    BufferOverflow { capacity: usize, pending: usize },

    /// A single HTTP attempt failed
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status: Option<u16>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },
}

fn context_suffix(context: &Option<String>) -> String {
    context
        .as_ref()
        .map(|c| format!(" ({})", c))
        .unwrap_or_default()
}

impl MonitorError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Transport { .. } => "TRANSPORT_ERROR",
            Self::CircuitOpen { .. } => "CIRCUIT_BREAKER_OPEN",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BufferOverflow { .. } => "BUFFER_OVERFLOW",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Json { .. } => "JSON_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
    }

    /// Whether another attempt could reasonably succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => match status {
                Some(code) => *code == 429 || *code >= 500,
                None => true,
            },
            Self::Transport { .. } | Self::CircuitOpen { .. } | Self::Io { .. } => true,
            Self::Configuration { .. }
            | Self::Validation { .. }
            | Self::BufferOverflow { .. }
            | Self::Json { .. } => false,
        }
    }

}
