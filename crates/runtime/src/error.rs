use std::path::PathBuf;

use thiserror::Error;

use crate::model::ModelError;
use crate::tools::ToolError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported server script {path}: expected a .py or .js file")]
    UnsupportedServerKind { path: PathBuf },

    #[error("connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    ModelService(#[from] ModelError),

    #[error(transparent)]
    ToolInvocation(#[from] ToolError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
