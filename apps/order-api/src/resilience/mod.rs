//! Resilience patterns for remote service calls.
//!
//! Named retry policies are defined once at startup, collected into an
//! immutable [`PolicyRegistry`] and shared by every aggregation request.

mod registry;
mod retry;

use thiserror::Error;

pub use registry::{PolicyRegistry, PolicyRegistryBuilder, RETRY_POLICY};
pub use retry::{
    AttemptState, ErrorCategory, ExponentialBackoffCalculator, RetryClassify, RetryError,
    RetryPolicy,
};

/// Errors raised while building or querying the policy registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResilienceError {
    /// No policy is registered under the requested name.
    #[error("Unknown resilience policy: {name}")]
    UnknownPolicy {
        /// Requested policy name.
        name: String,
    },

    /// A policy failed validation.
    #[error("Invalid resilience policy '{name}': {reason}")]
    InvalidPolicy {
        /// Policy name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The mandatory retry policy is absent.
    #[error("Resilience registry must define the 'retry' policy")]
    MissingRetryPolicy,
}
