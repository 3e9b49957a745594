//! Tool provider trait.

use crate::tools::{ToolError, ToolOutput, ToolSpec};
use serde_json::Value;
use std::future::Future;

/// Trait for the channel to a tool provider.
///
/// Implementations list and execute tools. This is the boundary between the
/// conversation loop and side effects.
pub trait ToolProvider: Send + Sync {
    /// Fetch the provider's current tool catalog.
    fn list_tools(&self) -> impl Future<Output = Result<Vec<ToolSpec>, ToolError>> + Send;

    /// Execute a tool with JSON arguments.
    fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> impl Future<Output = Result<ToolOutput, ToolError>> + Send;

    /// Release the channel and everything behind it.
    fn close(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}
