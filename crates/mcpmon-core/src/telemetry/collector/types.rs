//! Collector types

use super::collector::MetricsCollector;
use crate::config::ValidatedMonitorOptions;
use crate::transport::HttpTransport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared collector handle
pub type SharedMetricsCollector = Arc<MetricsCollector>;

/// What a flush did with the batch it drained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing was pending
    Empty,
    /// The transport accepted the batch
    Delivered(usize),
    /// The transport failed; the batch was dropped
    Failed(usize),
    /// No transport configured; the batch was dropped
    Discarded(usize),
}

impl FlushOutcome {
    /// Number of events drained from the buffer
    pub fn event_count(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Delivered(n) | Self::Failed(n) | Self::Discarded(n) => *n,
        }
    }
}

/// Counters describing collector activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorStats {
    pub recorded_events: u64,
    pub delivered_events: u64,
    pub dropped_events: u64,
    pub delivered_batches: u64,
    pub failed_batches: u64,
}

/// Create a shared collector wired to the HTTP transport
pub fn create_metrics_collector(options: &ValidatedMonitorOptions) -> SharedMetricsCollector {
    let transport = Arc::new(HttpTransport::from_options(options));
    Arc::new(MetricsCollector::from_options(options, Some(transport)))
}
