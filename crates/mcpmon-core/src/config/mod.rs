//! Monitor configuration
//!
//! [`MonitorOptions`] is the raw, partially filled data definition read from
//! code, environment or a file. [`validate_monitor_options`] turns it into a
//! [`ValidatedMonitorOptions`] with defaults applied, or fails with a
//! configuration error. The validated value is passed explicitly to each
//! component that needs it.

mod defaults;
mod loader;
mod options;
mod validation;

pub use defaults::*;
pub use loader::{ENV_API_KEY, ENV_BATCH_SIZE, ENV_LOG_LEVEL, ENV_METRICS_URL, ENV_RETRY_ATTEMPTS, ENV_TIMEOUT_MS};
pub use options::{MonitorOptions, ValidatedMonitorOptions};
pub use validation::validate_monitor_options;
