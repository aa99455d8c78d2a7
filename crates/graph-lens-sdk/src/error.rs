//! Error types for the Graph Lens SDK

use thiserror::Error;

/// Errors that can occur when using the Graph Lens SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// The gateway answered with an error body
    #[error("{kind} ({status}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    /// Gateway error raised in-process (embedded mode)
    #[error(transparent)]
    Gateway(#[from] graph_lens::GatewayError),

    /// The gateway answered with a body of the wrong shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Base URL could not be combined with the request path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
