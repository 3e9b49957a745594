//! MCP (Model Context Protocol) channel to a tool-provider process.
//!
//! This module talks to an MCP server over stdio using the official rmcp SDK.
//!
//! # Example
//!
//! ```ignore
//! use runtime::tools::{LaunchCommand, McpChannel, ToolProvider};
//!
//! # async fn example() -> runtime::Result<()> {
//! let command = LaunchCommand {
//!     program: "python".into(),
//!     args: vec!["weather.py".into()],
//! };
//! let channel = McpChannel::spawn(&command).await?;
//!
//! for tool in channel.list_tools().await? {
//!     println!("Tool: {}", tool.name);
//! }
//! channel.close().await;
//! # Ok(())
//! # }
//! ```

use rmcp::{
    ServiceExt,
    model::CallToolRequestParams,
    service::{RoleClient, RunningService},
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use serde_json::Value;
use tokio::process::Command;

use super::{LaunchCommand, ToolArguments, ToolError, ToolOutput, ToolProvider, ToolSpec};
use crate::{Error, Result};

/// An MCP client session connected to a server process.
///
/// Dropping the channel cancels the session and stops the child process;
/// [`ToolProvider::close`] does the same and waits for it.
pub struct McpChannel {
    service: RunningService<RoleClient, ()>,
}

impl McpChannel {
    /// Spawn the server process and perform the MCP initialize handshake.
    pub async fn spawn(command: &LaunchCommand) -> Result<Self> {
        let transport = TokioChildProcess::new(Command::new(&command.program).configure(|cmd| {
            for arg in &command.args {
                cmd.arg(arg);
            }
        }))
        .map_err(|e| Error::Connection(format!("failed to spawn {}: {e}", command.program)))?;

        let service = ()
            .serve(transport)
            .await
            .map_err(|e| Error::Connection(format!("handshake failed: {e}")))?;

        tracing::debug!(program = %command.program, "MCP session initialized");

        Ok(Self { service })
    }
}

impl ToolProvider for McpChannel {
    async fn list_tools(&self) -> std::result::Result<Vec<ToolSpec>, ToolError> {
        let response = self
            .service
            .list_tools(Default::default())
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        Ok(response.tools.into_iter().map(ToolSpec::from).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let arguments = ToolArguments::try_from(arguments)?;
        let params = CallToolRequestParams {
            name: name.to_string().into(),
            arguments: arguments.0,
            meta: None,
            task: None,
        };

        let result = self
            .service
            .call_tool(params)
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))?;
        Ok(ToolOutput::from(result))
    }

    async fn close(self) {
        match self.service.cancel().await {
            Ok(reason) => tracing::debug!(?reason, "MCP session closed"),
            Err(e) => tracing::warn!("MCP session did not shut down cleanly: {e}"),
        }
    }
}
