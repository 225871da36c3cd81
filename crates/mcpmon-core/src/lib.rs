//! mcpmon core library
//!
//! Fail-open telemetry for tool servers: instrument tool calls, buffer the
//! resulting events and ship them in batches through a transport guarded by
//! retry and a circuit breaker. Telemetry failures are logged and absorbed;
//! they never reach the instrumented code.

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod recovery;
pub mod telemetry;
pub mod transport;

// Re-export commonly used types
pub use config::{MonitorOptions, ValidatedMonitorOptions, validate_monitor_options};
pub use error::{MonitorError, MonitorResult};
pub use event::{EventValidator, ToolCallEvent, parse_event_batch};
pub use logging::{LogFormat, LogLevel, init_logging};
pub use recovery::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig, RetryExecutor, with_retry,
};
pub use telemetry::{
    EventBuffer, EventSink, EventWrapper, FlushOutcome, MetricsCollector, SharedMetricsCollector,
};
pub use transport::{HttpTransport, Transport};
