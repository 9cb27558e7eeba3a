//! Aggregation errors.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::application::ports::UpstreamError;
use crate::domain::ordering::OrderError;
use crate::domain::shared::{ClientId, OrderId};
use crate::resilience::{ResilienceError, RetryError};

/// Remote service an order detail depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// Product service.
    Product,
    /// User / authentication service.
    User,
}

impl Dependency {
    /// Lowercase name used in logs and messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to produce an order detail or an order listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// No order has the requested ID.
    #[error("Order not found: {order_id}")]
    OrderNotFound {
        /// Requested order.
        order_id: OrderId,
    },

    /// A referenced product or user does not exist upstream.
    #[error("{dependency} {id} not found")]
    DependencyNotFound {
        /// Which service reported the absence.
        dependency: Dependency,
        /// Referenced ID.
        id: i64,
    },

    /// A remote fetch kept failing or could not be made.
    #[error("{dependency} service unavailable after {attempts} attempt(s): {reason}")]
    UpstreamUnavailable {
        /// Which service failed.
        dependency: Dependency,
        /// Attempts made before giving up.
        attempts: u32,
        /// Last failure.
        reason: String,
    },

    /// The client has no orders.
    #[error("No orders found for client {client_id}")]
    NoOrdersFound {
        /// Requested client.
        client_id: ClientId,
    },

    /// The caller's deadline elapsed first.
    #[error("Request deadline exceeded after {}ms", .elapsed.as_millis())]
    DeadlineExceeded {
        /// Budget that ran out.
        elapsed: Duration,
    },

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// Remote data contradicts the order it was fetched for.
    #[error("Inconsistent upstream data: {reason}")]
    Inconsistent {
        /// What did not match.
        reason: String,
    },

    /// The order store failed.
    #[error("Order store failure: {0}")]
    Store(OrderError),

    /// The policy registry could not serve the retry policy.
    #[error(transparent)]
    Resilience(#[from] ResilienceError),
}

impl AggregationError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::OrderNotFound { .. } => "ORDER_NOT_FOUND",
            Self::DependencyNotFound { .. } => "DEPENDENCY_NOT_FOUND",
            Self::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            Self::NoOrdersFound { .. } => "NO_ORDERS_FOUND",
            Self::DeadlineExceeded { .. } => "DEADLINE_EXCEEDED",
            Self::Cancelled => "CANCELLED",
            Self::Inconsistent { .. } => "INCONSISTENT_UPSTREAM_DATA",
            Self::Store(_) => "ORDER_STORE_ERROR",
            Self::Resilience(_) => "RESILIENCE_CONFIGURATION_ERROR",
        }
    }

    /// Whether the caller may reasonably try the same request again later.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::DeadlineExceeded { .. } | Self::Inconsistent { .. }
        )
    }

    /// Map the final outcome of a guarded remote fetch.
    pub(crate) fn from_upstream(
        dependency: Dependency,
        id: i64,
        error: RetryError<UpstreamError>,
    ) -> Self {
        let attempts = error.attempts();
        match error.into_inner() {
            UpstreamError::NotFound { .. } => Self::DependencyNotFound { dependency, id },
            other => Self::UpstreamUnavailable {
                dependency,
                attempts,
                reason: other.to_string(),
            },
        }
    }
}

impl From<OrderError> for AggregationError {
    fn from(err: OrderError) -> Self {
        Self::Store(err)
    }
}
