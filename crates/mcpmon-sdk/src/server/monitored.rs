//! Monitored server implementation

use super::error::ToolError;
use super::handler::ToolHandler;
use super::types::{ServerInfo, ToolDescriptor};
use mcpmon_core::config::{MonitorOptions, ValidatedMonitorOptions, validate_monitor_options};
use mcpmon_core::error::MonitorResult;
use mcpmon_core::event::ToolCallEvent;
use mcpmon_core::telemetry::{EventWrapper, FlushOutcome, MetricsCollector, SharedMetricsCollector};
use mcpmon_core::transport::{HttpTransport, Transport};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Tool server whose tool calls are recorded by a metrics collector
pub struct MonitoredServer {
    info: ServerInfo,
    options: ValidatedMonitorOptions,
    collector: SharedMetricsCollector,
    wrapper: EventWrapper,
    tools: RwLock<HashMap<String, RegisteredTool>>,
    registration_order: RwLock<Vec<String>>,
    closed: AtomicBool,
}

impl MonitoredServer {
    /// Create a server shipping metrics over HTTP
    pub fn new(info: ServerInfo, options: MonitorOptions) -> MonitorResult<Self> {
        let validated = validate_monitor_options(&options)?;
        Ok(Self::from_validated(info, validated))
    }

    /// Create a server shipping metrics over HTTP from already validated options
    pub fn from_validated(info: ServerInfo, options: ValidatedMonitorOptions) -> Self {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::from_options(&options));
        Self::assemble(info, options, Some(transport))
    }

    /// Create a server with a custom transport, or none to keep metrics local
    pub fn with_transport(
        info: ServerInfo,
        options: MonitorOptions,
        transport: Option<Arc<dyn Transport>>,
    ) -> MonitorResult<Self> {
        let validated = validate_monitor_options(&options)?;
        Ok(Self::assemble(info, validated, transport))
    }

    fn assemble(
        info: ServerInfo,
        options: ValidatedMonitorOptions,
        transport: Option<Arc<dyn Transport>>,
    ) -> Self {
        tracing::info!(
            server_name = %info.name,
            server_version = %info.version,
            batch_size = options.batch_size,
            metrics_server_url = %options.metrics_server_url,
            has_transport = transport.is_some(),
            "Initializing monitored server"
        );

        let collector = Arc::new(MetricsCollector::from_options(&options, transport));
        let wrapper = EventWrapper::new(collector.clone());

        Self {
            info,
            options,
            collector,
            wrapper,
            tools: RwLock::new(HashMap::new()),
            registration_order: RwLock::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Effective monitoring options
    pub fn options(&self) -> &ValidatedMonitorOptions {
        &self.options
    }

    /// Register a tool; names must be unique and not blank
    pub fn register_tool<H>(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: H,
    ) -> Result<(), ToolError>
    where
        H: ToolHandler + 'static,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ToolError::invalid_arguments("tool name must not be empty"));
        }

        let mut tools = self.tools.write();
        if tools.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered(name));
        }

        tracing::debug!(tool_name = %name, "Registering tool");
        tools.insert(
            name.clone(),
            RegisteredTool {
                descriptor: ToolDescriptor {
                    name: name.clone(),
                    description: description.into(),
                },
                handler: Arc::new(handler),
            },
        );
        self.registration_order.write().push(name);
        Ok(())
    }

    /// Invoke a registered tool; the call is recorded whatever its outcome
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        if self.is_closed() {
            return Err(ToolError::ServerClosed);
        }

        let handler = self
            .tools
            .read()
            .get(name)
            .map(|tool| tool.handler.clone())
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        self.wrapper
            .observe(name, args, |args| async move { handler.call(args).await })
            .await
    }

    /// Registered tools in registration order
    pub fn tools(&self) -> Vec<ToolDescriptor> {
        let tools = self.tools.read();
        self.registration_order
            .read()
            .iter()
            .filter_map(|name| tools.get(name).map(|tool| tool.descriptor.clone()))
            .collect()
    }

    /// Ship whatever is pending now
    pub async fn flush_metrics(&self) -> FlushOutcome {
        self.collector.flush().await
    }

    pub fn pending_metrics(&self) -> Vec<ToolCallEvent> {
        self.collector.pending_events()
    }

    pub fn collector(&self) -> &SharedMetricsCollector {
        &self.collector
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Refuse further calls and flush what is pending
    pub async fn close(&self) -> FlushOutcome {
        if self.closed.swap(true, Ordering::AcqRel) {
            return FlushOutcome::Empty;
        }
        tracing::info!(server_name = %self.info.name, "Closing monitored server");
        self.collector.flush().await
    }
}

impl std::fmt::Debug for MonitoredServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitoredServer")
            .field("info", &self.info)
            .field("tools", &self.registration_order.read())
            .field("closed", &self.is_closed())
            .field("collector", &self.collector)
            .finish()
    }
}
