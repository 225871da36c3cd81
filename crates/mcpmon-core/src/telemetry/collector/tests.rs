//! Tests for metrics collector

#[cfg(test)]
mod tests {
    use super::super::collector::MetricsCollector;
    use super::super::types::FlushOutcome;
    use crate::error::{MonitorError, MonitorResult};
    use crate::event::ToolCallEvent;
    use crate::telemetry::buffer::EventBuffer;
    use crate::transport::{MockTransport, Transport};
    use async_trait::async_trait;
    use chrono::Utc;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn event(name: &str) -> ToolCallEvent {
        ToolCallEvent::success(name, Utc::now(), 1, 2, 3)
    }

    /// Records every batch it receives
    #[derive(Default)]
    struct RecordingTransport {
        batches: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, events: &[ToolCallEvent]) -> MonitorResult<()> {
            self.batches
                .lock()
                .push(events.iter().map(|e| e.tool_name.clone()).collect());
            Ok(())
        }
    }

    /// Blocks the first send until released
    struct GatedTransport {
        release: Notify,
        entered: Notify,
        batches: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn send(&self, events: &[ToolCallEvent]) -> MonitorResult<()> {
            let first = self.batches.lock().is_empty();
            self.batches
                .lock()
                .push(events.iter().map(|e| e.tool_name.clone()).collect());
            if first {
                self.entered.notify_one();
                self.release.notified().await;
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_below_batch_size_does_not_flush() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let collector = MetricsCollector::new(5, Some(Arc::new(transport)));

        for i in 0..4 {
            collector.record_event(event(&format!("t{}", i))).await;
        }

        assert_eq!(collector.pending_count(), 4);
        assert_eq!(collector.pending_events().len(), 4);
    }

    #[tokio::test]
    async fn test_reaching_batch_size_flushes_exactly_once() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .withf(|events: &[ToolCallEvent]| events.len() == 3)
            .returning(|_| Ok(()));
        let collector = MetricsCollector::new(3, Some(Arc::new(transport)));

        for name in ["a", "b", "c"] {
            collector.record_event(event(name)).await;
        }

        assert_eq!(collector.pending_count(), 0);
        let stats = collector.stats();
        assert_eq!(stats.recorded_events, 3);
        assert_eq!(stats.delivered_events, 3);
        assert_eq!(stats.delivered_batches, 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_absorbed() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|events| Err(MonitorError::transport("http://collector", events.len(), "refused")));
        let collector = MetricsCollector::new(10, Some(Arc::new(transport)));

        collector.record_event(event("a")).await;
        collector.record_event(event("b")).await;

        let outcome = collector.flush().await;
        assert_eq!(outcome, FlushOutcome::Failed(2));
        // Handed to the failed attempt, so dropped
        assert_eq!(collector.pending_count(), 0);

        let stats = collector.stats();
        assert_eq!(stats.failed_batches, 1);
        assert_eq!(stats.dropped_events, 2);
    }

    #[tokio::test]
    async fn test_empty_flush_is_noop() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let collector = MetricsCollector::new(3, Some(Arc::new(transport)));

        assert_eq!(collector.flush().await, FlushOutcome::Empty);
    }

    #[tokio::test]
    async fn test_without_transport_batches_are_discarded() {
        let collector = MetricsCollector::new(2, None);
        collector.record_event(event("a")).await;
        collector.record_event(event("b")).await;

        assert_eq!(collector.pending_count(), 0);
        assert_eq!(collector.stats().dropped_events, 2);
        assert!(!collector.has_transport());
    }

    #[tokio::test]
    async fn test_batches_preserve_order() {
        let transport = Arc::new(RecordingTransport::default());
        let collector = MetricsCollector::new(2, Some(transport.clone()));

        for name in ["a", "b", "c", "d", "e"] {
            collector.record_event(event(name)).await;
        }
        collector.flush().await;

        let batches = transport.batches.lock().clone();
        assert_eq!(
            batches,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
                vec!["e".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_events_recorded_during_flush_are_kept_and_flushes_serialize() {
        let transport = Arc::new(GatedTransport {
            release: Notify::new(),
            entered: Notify::new(),
            batches: Mutex::new(Vec::new()),
        });
        let collector = Arc::new(MetricsCollector::new(2, Some(transport.clone())));

        collector.record_event(event("a")).await;
        let first = {
            let collector = collector.clone();
            tokio::spawn(async move { collector.record_event(event("b")).await })
        };
        transport.entered.notified().await;

        // First flush is in flight; recording still proceeds on the live buffer
        collector.record_event(event("c")).await;
        assert_eq!(collector.pending_count(), 1);

        let second = {
            let collector = collector.clone();
            tokio::spawn(async move { collector.record_event(event("d")).await })
        };
        tokio::task::yield_now().await;
        assert_eq!(transport.batches.lock().len(), 1);

        transport.release.notify_one();
        first.await.unwrap();
        second.await.unwrap();

        let batches = transport.batches.lock().clone();
        assert_eq!(
            batches,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ]
        );
        assert_eq!(collector.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_hard_limit_drops_overflow() {
        let buffer = EventBuffer::with_hard_limit(3, 3);
        for name in ["a", "b", "c"] {
            buffer.add(event(name));
        }
        let collector = MetricsCollector::with_buffer(buffer, None);

        collector.record_event(event("d")).await;

        let stats = collector.stats();
        assert_eq!(stats.recorded_events, 0);
        // One rejected at the limit, three discarded by the flush
        assert_eq!(stats.dropped_events, 4);
        assert_eq!(collector.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_collector_as_wrapper_sink() {
        use crate::telemetry::EventWrapper;

        let transport = Arc::new(RecordingTransport::default());
        let collector = Arc::new(MetricsCollector::new(1, Some(transport.clone())));
        let wrapper = EventWrapper::new(collector.clone());

        let add = wrapper.wrap("add", |(a, b): (i64, i64)| async move {
            Ok::<_, std::io::Error>(a + b)
        })
        .unwrap();
        assert_eq!(add.call((2, 3)).await.unwrap(), 5);

        assert_eq!(transport.batches.lock().clone(), vec![vec!["add".to_string()]]);
        assert_eq!(collector.stats().delivered_events, 1);
    }

    #[tokio::test]
    async fn test_clear_drops_pending() {
        let collector = MetricsCollector::new(10, None);
        collector.record_event(event("a")).await;
        collector.clear();

        assert_eq!(collector.pending_count(), 0);
        assert_eq!(collector.flush().await, FlushOutcome::Empty);
    }
}
