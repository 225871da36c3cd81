//! Tool handler trait

use super::error::ToolError;
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;

/// Implementation behind a registered tool
///
/// Async closures taking and returning JSON implement this directly.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with the given arguments
    async fn call(&self, args: Value) -> Result<Value, ToolError>;
}

#[async_trait]
impl<F, Fut> ToolHandler for F
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, ToolError>> + Send,
{
    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        (self)(args).await
    }
}
