//! Connecting to a tool-provider script.

use std::path::{Path, PathBuf};

use super::{McpChannel, ToolProvider, ToolSpec};
use crate::{Error, Result};

/// The kind of server script, chosen by file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerKind {
    Python,
    Node,
}

impl ServerKind {
    /// Detect the server kind from the script path.
    ///
    /// Only the literal suffixes `.py` and `.js` are recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy();
        if name.ends_with(".py") {
            Ok(Self::Python)
        } else if name.ends_with(".js") {
            Ok(Self::Node)
        } else {
            Err(Error::UnsupportedServerKind {
                path: path.to_path_buf(),
            })
        }
    }
}

/// Interpreters used to launch server scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreters {
    pub python: String,
    pub node: String,
}

impl Default for Interpreters {
    fn default() -> Self {
        Self {
            python: "python".to_string(),
            node: "node".to_string(),
        }
    }
}

/// A process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Build the command that runs the given server script.
pub fn launch_command(path: &Path, interpreters: &Interpreters) -> Result<LaunchCommand> {
    let program = match ServerKind::from_path(path)? {
        ServerKind::Python => &interpreters.python,
        ServerKind::Node => &interpreters.node,
    };
    Ok(LaunchCommand {
        program: program.clone(),
        args: vec![path.to_string_lossy().into_owned()],
    })
}

/// An established channel plus the catalog it advertised at connect time.
pub struct Connection {
    pub channel: McpChannel,
    /// For display only; the conversation loop re-lists tools per query.
    pub tools: Vec<ToolSpec>,
}

/// Launch the server script and open an MCP session to it.
pub async fn connect(path: impl Into<PathBuf>, interpreters: &Interpreters) -> Result<Connection> {
    let path = path.into();
    let command = launch_command(&path, interpreters)?;
    tracing::info!(program = %command.program, script = %path.display(), "connecting to tool server");

    let channel = McpChannel::spawn(&command).await?;
    let tools = match channel.list_tools().await {
        Ok(tools) => tools,
        Err(e) => {
            channel.close().await;
            return Err(Error::Connection(format!("failed to list tools: {e}")));
        }
    };

    Ok(Connection { channel, tools })
}
