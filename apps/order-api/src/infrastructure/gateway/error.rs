//! Gateway-specific error types.

use thiserror::Error;

use crate::application::ports::UpstreamError;

/// Errors from the gateway adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Adapter configuration is unusable.
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfig(String),

    /// The request could not be constructed.
    #[error("Failed to build request: {0}")]
    Build(String),

    /// The service answered 404.
    #[error("{resource} not found")]
    NotFound {
        /// What was requested.
        resource: String,
    },

    /// The service answered with another non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code.
        status: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// The request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection-level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// The payload describes a different entity than the one requested.
    #[error("Requested {resource} {expected} but received {actual}")]
    UnexpectedEntity {
        /// Entity kind.
        resource: &'static str,
        /// Requested ID.
        expected: i64,
        /// ID in the payload.
        actual: i64,
    },

    /// The payload parsed but carries an unusable value.
    #[error("Invalid {resource} payload: {message}")]
    InvalidPayload {
        /// Entity kind.
        resource: &'static str,
        /// What was wrong.
        message: String,
    },
}

impl From<GatewayError> for UpstreamError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotFound { resource } => Self::NotFound { resource },
            GatewayError::InvalidConfig(message) | GatewayError::Build(message) => {
                Self::Fatal { message }
            }
            GatewayError::Http { status, .. } => Self::Transient {
                message: format!("HTTP {status}"),
                status: Some(status),
            },
            other @ (GatewayError::Timeout(_)
            | GatewayError::Network(_)
            | GatewayError::JsonParse(_)
            | GatewayError::UnexpectedEntity { .. }
            | GatewayError::InvalidPayload { .. }) => Self::Transient {
                message: other.to_string(),
                status: None,
            },
        }
    }
}
