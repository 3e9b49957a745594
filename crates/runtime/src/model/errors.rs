use thiserror::Error;

/// Errors from a model backend call.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The request never got a response, e.g. DNS, TLS or connection failure.
    #[error("network: {0}")]
    Network(String),

    /// The API answered with a non-success status; holds the status and body.
    #[error("provider api: {0}")]
    Api(String),

    /// The response body was not the JSON the backend expects.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}
