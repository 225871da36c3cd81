//! Basic usage example for the mcpmon SDK
//!
//! Reads `MCP_API_KEY` and `METRICS_SERVER_URL` from the environment. Without a
//! collector listening, delivery fails and is logged; the tool calls still
//! succeed.

use async_trait::async_trait;
use mcpmon_sdk::{MonitorOptions, MonitoredServer, ServerInfo, ToolError, ToolHandler};
use serde_json::{Value, json};

struct WordCount;

#[async_trait]
impl ToolHandler for WordCount {
    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let text = args["text"]
            .as_str()
            .ok_or_else(|| ToolError::invalid_arguments("text must be a string"))?;
        Ok(json!({ "words": text.split_whitespace().count() }))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let options = MonitorOptions::from_env()?
        .merge(MonitorOptions::new("demo".repeat(16)).with_batch_size(3));

    let server = MonitoredServer::new(ServerInfo::new("word-tools", "0.1.0"), options)?;
    server.register_tool("word_count", "Count words in a text", WordCount)?;

    for text in ["hello world", "one", "fail-open telemetry never blocks a tool"] {
        let result = server.call_tool("word_count", json!({ "text": text })).await?;
        println!("{:>45} -> {}", text, result["words"]);
    }

    // Recorded as a failed call
    let err = server.call_tool("word_count", json!({ "text": 42 })).await.unwrap_err();
    println!("invalid call: {}", err);

    println!("pending events before close: {}", server.pending_metrics().len());
    let outcome = server.close().await;
    println!("final flush: {:?}", outcome);
    println!("stats: {:?}", server.collector().stats());

    Ok(())
}
