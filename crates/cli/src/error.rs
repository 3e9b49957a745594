//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that end the `mcp-chat` process with exit status 1.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred in the runtime layer.
    #[error(transparent)]
    Runtime(#[from] runtime::Error),

    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
