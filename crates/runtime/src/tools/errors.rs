use thiserror::Error;

/// Errors that can occur while listing or invoking tools.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("execution failed: {0}")]
    Execution(String),
}
