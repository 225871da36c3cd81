//! Metrics collector: buffers events and decides when to ship them

mod collector;
mod tests;
mod types;

pub use collector::MetricsCollector;
pub use types::{CollectorStats, FlushOutcome, SharedMetricsCollector, create_metrics_collector};
