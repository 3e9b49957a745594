//! mcp-chat runtime: a chat loop between a user, a hosted model and one
//! MCP tool server.
//!
//! # Overview
//!
//! - **Connector**: [`tools::connect`] launches a `.py` or `.js` server script
//!   and opens an MCP session to it over stdio.
//! - **Conversation**: [`Conversation`] answers one query at a time, running
//!   the tools the model asks for in its first response.
//! - **Shell**: [`Shell`] reads queries line by line and prints answers.
//! - **Session**: [`run_session`] runs the shell and releases the tool server
//!   on every exit path.
//!
//! # Example
//!
//! ```ignore
//! use runtime::{AnthropicBackend, Shell, run_session, tools};
//! use tokio::io::BufReader;
//!
//! # async fn example() -> runtime::Result<()> {
//! let connection = tools::connect("weather.py", &tools::Interpreters::default()).await?;
//! let backend = AnthropicBackend::builder("sk-ant-api01-...", "claude-3-5-sonnet-20241022").build();
//! let mut shell = Shell::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
//!
//! run_session(connection.channel, &backend, &mut shell, async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await
//! # }
//! ```

mod conversation;
mod error;
pub mod model;
mod providers;
mod session;
mod shell;
pub mod tools;

#[cfg(test)]
mod testing;

pub use conversation::{Conversation, Transcript};
pub use error::{Error, Result};
pub use model::{Backend, Message, ModelError, Part, Role, ToolCall, Usage};
pub use providers::{
    AnthropicBackend, AnthropicBackendBuilder, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS,
};
pub use session::run_session;
pub use shell::{QueryHandler, Shell};
pub use tools::{ToolCallRecord, ToolError, ToolOutput, ToolProvider, ToolSpec};
