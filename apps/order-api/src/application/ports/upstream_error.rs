//! Outcome of a failed remote fetch.

use thiserror::Error;

use crate::resilience::{ErrorCategory, RetryClassify};

/// Failure of a single call to a remote service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The service answered that the entity does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// What was requested, e.g. `product 3`.
        resource: String,
    },

    /// The call failed in a way that may clear on its own.
    #[error("Transient upstream failure: {message}")]
    Transient {
        /// Error details.
        message: String,
        /// HTTP status, when the service answered at all.
        status: Option<u16>,
    },

    /// The call could not be made at all.
    #[error("Upstream call failed: {message}")]
    Fatal {
        /// Error details.
        message: String,
    },
}

impl UpstreamError {
    /// Transient failure without a status code.
    #[must_use]
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
            status: None,
        }
    }

    /// Returns true when the entity definitively does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl RetryClassify for UpstreamError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Transient { .. } => ErrorCategory::Transient,
            Self::NotFound { .. } | Self::Fatal { .. } => ErrorCategory::Terminal,
        }
    }
}
