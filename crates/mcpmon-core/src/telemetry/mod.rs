//! Tool call telemetry
//!
//! Instrumented invocations become [`ToolCallEvent`](crate::event::ToolCallEvent)s
//! through the [`EventWrapper`], land in the [`MetricsCollector`]'s
//! [`EventBuffer`], and are shipped in batches by a
//! [`Transport`](crate::transport::Transport) whenever the buffer fills up or a
//! flush is requested.

pub mod buffer;
pub mod collector;
pub mod sink;
pub mod wrapper;

pub use buffer::EventBuffer;
pub use collector::{
    CollectorStats, FlushOutcome, MetricsCollector, SharedMetricsCollector, create_metrics_collector,
};
pub use sink::EventSink;
pub use wrapper::{EventWrapper, InstrumentedFn, InstrumentedSyncFn};
