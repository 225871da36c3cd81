//! Metrics collector implementation
//!
//! Flushes are single-flight: a flush takes the gate before draining the
//! buffer, so a second flush waits for the first to finish and then ships
//! whatever accumulated meanwhile. Batches reach the transport in the order
//! their events were recorded. Recording never waits on the gate; only the
//! call that triggers a flush awaits it.

use super::types::{CollectorStats, FlushOutcome};
use crate::config::ValidatedMonitorOptions;
use crate::event::ToolCallEvent;
use crate::telemetry::buffer::EventBuffer;
use crate::telemetry::sink::EventSink;
use crate::transport::Transport;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Owns the event buffer and the transport
pub struct MetricsCollector {
    buffer: EventBuffer,
    transport: Option<Arc<dyn Transport>>,
    flush_gate: Mutex<()>,
    recorded_events: AtomicU64,
    delivered_events: AtomicU64,
    dropped_events: AtomicU64,
    delivered_batches: AtomicU64,
    failed_batches: AtomicU64,
}

impl MetricsCollector {
    /// Create a collector flushing every `batch_size` events
    pub fn new(batch_size: usize, transport: Option<Arc<dyn Transport>>) -> Self {
        Self::with_buffer(EventBuffer::new(batch_size), transport)
    }

    /// Create a collector around a preconfigured buffer
    pub fn with_buffer(buffer: EventBuffer, transport: Option<Arc<dyn Transport>>) -> Self {
        Self {
            buffer,
            transport,
            flush_gate: Mutex::new(()),
            recorded_events: AtomicU64::new(0),
            delivered_events: AtomicU64::new(0),
            dropped_events: AtomicU64::new(0),
            delivered_batches: AtomicU64::new(0),
            failed_batches: AtomicU64::new(0),
        }
    }

    /// Create a collector sized by validated options
    pub fn from_options(
        options: &ValidatedMonitorOptions,
        transport: Option<Arc<dyn Transport>>,
    ) -> Self {
        let buffer = match options.max_pending {
            Some(limit) => EventBuffer::with_hard_limit(options.batch_size, limit),
            None => EventBuffer::new(options.batch_size),
        };
        Self::with_buffer(buffer, transport)
    }

    /// Buffer an event, flushing if the buffer reports full
    pub async fn record_event(&self, event: ToolCallEvent) {
        let tool_name = event.tool_name.clone();
        let success = event.success;
        let duration = event.duration;

        if let Err(e) = self.buffer.try_add(event) {
            self.dropped_events.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                error = %e,
                tool_name = %tool_name,
                "Buffer at hard limit, dropping event"
            );
        } else {
            self.recorded_events.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                tool_name = %tool_name,
                success,
                duration,
                buffer_size = self.buffer.size(),
                "Event recorded"
            );
        }

        if self.buffer.is_full() {
            self.flush().await;
        }
    }

    /// Drain the buffer and hand the batch to the transport
    ///
    /// Never fails: transport errors are logged and the batch is dropped.
    pub async fn flush(&self) -> FlushOutcome {
        let _gate = self.flush_gate.lock().await;

        let events = self.buffer.flush();
        if events.is_empty() {
            return FlushOutcome::Empty;
        }

        let event_count = events.len();
        tracing::info!(event_count, "Flushing metrics batch");

        let Some(transport) = &self.transport else {
            self.dropped_events
                .fetch_add(event_count as u64, Ordering::Relaxed);
            tracing::debug!(event_count, "No transport configured, discarding batch");
            return FlushOutcome::Discarded(event_count);
        };

        match transport.send(&events).await {
            Ok(()) => {
                self.delivered_events
                    .fetch_add(event_count as u64, Ordering::Relaxed);
                self.delivered_batches.fetch_add(1, Ordering::Relaxed);
                FlushOutcome::Delivered(event_count)
            }
            Err(e) => {
                self.dropped_events
                    .fetch_add(event_count as u64, Ordering::Relaxed);
                self.failed_batches.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    error = %e,
                    error_code = e.error_code(),
                    event_count,
                    "Transport failed during flush"
                );
                FlushOutcome::Failed(event_count)
            }
        }
    }

    /// Copy of the events waiting for the next flush
    pub fn pending_events(&self) -> Vec<ToolCallEvent> {
        self.buffer.pending()
    }

    pub fn pending_count(&self) -> usize {
        self.buffer.size()
    }

    /// Drop pending events without sending them
    pub fn clear(&self) {
        self.buffer.clear();
        tracing::debug!("Buffer cleared");
    }

    pub fn batch_size(&self) -> usize {
        self.buffer.max_size()
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    pub fn stats(&self) -> CollectorStats {
        CollectorStats {
            recorded_events: self.recorded_events.load(Ordering::Relaxed),
            delivered_events: self.delivered_events.load(Ordering::Relaxed),
            dropped_events: self.dropped_events.load(Ordering::Relaxed),
            delivered_batches: self.delivered_batches.load(Ordering::Relaxed),
            failed_batches: self.failed_batches.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl EventSink for MetricsCollector {
    async fn record(&self, event: ToolCallEvent) {
        self.record_event(event).await;
    }
}

impl std::fmt::Debug for MetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsCollector")
            .field("batch_size", &self.buffer.max_size())
            .field("pending", &self.buffer.size())
            .field("transport", &self.transport.as_ref().map(|t| t.name()))
            .finish()
    }
}
