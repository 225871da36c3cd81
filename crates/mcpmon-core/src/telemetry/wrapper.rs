//! Instrumentation wrapper
//!
//! Wraps a callable so that every invocation produces exactly one
//! [`ToolCallEvent`], whatever the outcome. The wrapped callable's result or
//! error is handed back unchanged; the event is emitted before returning.
//!
//! Errors only need to implement [`Display`], so `anyhow::Error`, boxed
//! errors and plain strings all work. The alternate rendering (`{:#}`) is
//! used for `errorStack` when it carries more than the message.

use super::sink::EventSink;
use crate::error::{MonitorError, MonitorResult};
use crate::event::ToolCallEvent;
use chrono::Utc;
use futures::FutureExt;
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::time::Instant;

/// Factory for instrumented callables sharing one sink
#[derive(Clone)]
pub struct EventWrapper {
    sink: Arc<dyn EventSink>,
}

impl EventWrapper {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Wrap an async callable; the tool name must not be blank
    pub fn wrap<F>(&self, tool_name: impl Into<String>, f: F) -> MonitorResult<InstrumentedFn<F>> {
        Ok(InstrumentedFn {
            tool_name: checked_tool_name(tool_name.into())?,
            sink: self.sink.clone(),
            f,
        })
    }

    /// Wrap a synchronous callable; the result is async because emission is
    pub fn wrap_sync<F>(
        &self,
        tool_name: impl Into<String>,
        f: F,
    ) -> MonitorResult<InstrumentedSyncFn<F>> {
        Ok(InstrumentedSyncFn {
            tool_name: checked_tool_name(tool_name.into())?,
            sink: self.sink.clone(),
            f,
        })
    }

    /// Instrument a single invocation without building a wrapper
    ///
    /// A blank `tool_name` still runs `f`, but no event is emitted.
    pub async fn observe<A, R, E, F, Fut>(&self, tool_name: &str, args: A, f: F) -> Result<R, E>
    where
        A: Serialize,
        R: Serialize,
        E: Display,
        F: FnOnce(A) -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        instrument(self.sink.as_ref(), tool_name, args, f).await
    }
}

fn checked_tool_name(name: String) -> MonitorResult<Arc<str>> {
    if name.trim().is_empty() {
        return Err(MonitorError::validation_field(
            "toolName",
            "toolName must not be empty",
        ));
    }
    Ok(Arc::from(name))
}

/// Async callable with instrumentation attached
pub struct InstrumentedFn<F> {
    tool_name: Arc<str>,
    sink: Arc<dyn EventSink>,
    f: F,
}

impl<F> InstrumentedFn<F> {
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub async fn call<A, R, E, Fut>(&self, args: A) -> Result<R, E>
    where
        A: Serialize,
        R: Serialize,
        E: Display,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        instrument(self.sink.as_ref(), &self.tool_name, args, &self.f).await
    }
}

impl<F: Clone> Clone for InstrumentedFn<F> {
    fn clone(&self) -> Self {
        Self {
            tool_name: self.tool_name.clone(),
            sink: self.sink.clone(),
            f: self.f.clone(),
        }
    }
}

/// Synchronous callable with instrumentation attached
pub struct InstrumentedSyncFn<F> {
    tool_name: Arc<str>,
    sink: Arc<dyn EventSink>,
    f: F,
}

impl<F> InstrumentedSyncFn<F> {
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub async fn call<A, R, E>(&self, args: A) -> Result<R, E>
    where
        A: Serialize,
        R: Serialize,
        E: Display,
        F: Fn(A) -> Result<R, E>,
    {
        let f = &self.f;
        instrument(self.sink.as_ref(), &self.tool_name, args, |args| {
            std::future::ready(f(args))
        })
        .await
    }
}

async fn instrument<A, R, E, F, Fut>(
    sink: &dyn EventSink,
    tool_name: &str,
    args: A,
    f: F,
) -> Result<R, E>
where
    A: Serialize,
    R: Serialize,
    E: Display,
    F: FnOnce(A) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let started_at = Utc::now();
    let clock = Instant::now();
    // Measured up front because the call consumes the arguments
    let input_size = serialized_size(&args);

    let outcome = f(args).await;
    let duration_ms = clock.elapsed().as_millis() as u64;

    let event = match &outcome {
        Ok(result) => ToolCallEvent::success(
            tool_name,
            started_at,
            duration_ms,
            input_size,
            serialized_size(result),
        ),
        Err(error) => ToolCallEvent::failure(
            tool_name,
            started_at,
            duration_ms,
            input_size,
            error.to_string(),
            error_stack(error),
        ),
    };

    emit(sink, tool_name, event).await;
    outcome
}

/// Hand the event to the sink; a panicking sink is logged and ignored
async fn emit(sink: &dyn EventSink, tool_name: &str, event: ToolCallEvent) {
    if tool_name.trim().is_empty() {
        tracing::warn!("Tool call with a blank name was not recorded");
        return;
    }

    if AssertUnwindSafe(sink.record(event))
        .catch_unwind()
        .await
        .is_err()
    {
        tracing::error!(tool_name, "Event sink panicked while recording tool call");
    }
}

/// Byte length of the JSON serialization, 0 if it cannot be serialized
pub fn serialized_size<T: Serialize + ?Sized>(value: &T) -> u64 {
    serde_json::to_vec(value)
        .map(|bytes| bytes.len() as u64)
        .unwrap_or(0)
}

/// Causes from the alternate rendering, if it adds anything to the message
///
/// `anyhow::Error` renders `outer: cause: cause` in alternate mode, which
/// becomes `caused by: cause: cause`.
fn error_stack<E: Display + ?Sized>(error: &E) -> Option<String> {
    let message = error.to_string();
    let detailed = format!("{:#}", error);
    if detailed == message {
        return None;
    }

    match detailed
        .strip_prefix(message.as_str())
        .and_then(|rest| rest.strip_prefix(": "))
    {
        Some(causes) => Some(format!("caused by: {}", causes)),
        None => Some(detailed),
    }
}
