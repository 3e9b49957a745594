//! Tool-provider channel, connector and MCP integration.

mod connector;
pub mod errors;
mod mcp_client;
mod provider;
mod types;

pub use connector::{Connection, Interpreters, LaunchCommand, ServerKind, connect, launch_command};
pub use errors::ToolError;
pub use mcp_client::McpChannel;
pub use provider::ToolProvider;
pub use types::{ToolArguments, ToolCallRecord, ToolOutput, ToolSpec};
