//! Error types for the client library.

use thiserror::Error;

/// Errors that can occur when talking to the Rebrickable API.
///
/// Only transport-class failures surface as errors. Application-level
/// rejections (a payload carrying a `detail` field) are logged and returned
/// as the `Ok(None)` sentinel by the endpoint methods instead; see the
/// crate-level documentation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Network or HTTP request failure.
    ///
    /// Indicates issues like DNS resolution, connection failures, or socket
    /// errors. Retrying is the caller's responsibility.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization error.
    ///
    /// Raised when a response body is not valid JSON, or when a payload
    /// does not decode into the requested type.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client configuration issue.
    ///
    /// Invalid base URL, or a token exchange attempted without a
    /// username/password pair.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unexpected or malformed API response.
    ///
    /// The API returned data that doesn't match the expected format, e.g.
    /// a token-exchange payload without a `user_token` field.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Check if this error came from the HTTP transport.
    ///
    /// Transport errors are the only failures worth retrying; everything
    /// else indicates a local misconfiguration or a contract mismatch.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a configuration error.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
