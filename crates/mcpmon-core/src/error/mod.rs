//! Error types for mcpmon
//!
//! One error enum covers the whole pipeline. The split that matters is between
//! errors raised by the instrumented operation (never touched here, the
//! wrapper hands them back to the caller untouched) and errors raised by the
//! delivery path (transport, retry exhaustion, open circuit), which the
//! collector absorbs at its flush boundary.

mod constructors;
mod conversions;
mod types;

pub use types::{MonitorError, MonitorResult};
