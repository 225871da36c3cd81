//! Default values for monitor options

/// Default collector endpoint
pub const DEFAULT_METRICS_SERVER_URL: &str = "http://localhost:8000/v1/metrics";

/// Default buffer capacity and flush trigger
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default per-attempt HTTP timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default number of delivery attempts per batch
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;

/// Default log level name
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Minimum accepted API key length
pub const MIN_API_KEY_LEN: usize = 64;
