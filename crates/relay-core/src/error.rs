//! # Relay Error Types
//!
//! Typed error handling for the relay and its vendor clients.
//! All vendor operations return `Result<T, RelayError>`.

use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Vendor API returned a non-success response
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with a vendor
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Vendor call succeeded but carried no data payload
    #[error("Empty response from {provider} for {operation}")]
    EmptyResponse { provider: String, operation: String },

    /// Could not obtain credentials for a vendor call
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Build an `EmptyResponse` error
    pub fn empty_response(provider: impl Into<String>, operation: impl Into<String>) -> Self {
        RelayError::EmptyResponse {
            provider: provider.into(),
            operation: operation.into(),
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Serialization(err.to_string())
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
