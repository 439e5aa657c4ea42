//! Error types for the Harmony Hub client.

use thiserror::Error;

/// Errors that can occur when talking to a Harmony Hub server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Whether the server answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ServerError { status: 404, .. })
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
