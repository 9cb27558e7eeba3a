//! Ordering errors.

use std::fmt;

use crate::domain::shared::DomainError;

/// Errors raised by the order entity and the order store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Invalid order parameters.
    InvalidParameters {
        /// Field with invalid value.
        field: String,
        /// Error message.
        message: String,
    },

    /// Order not found.
    NotFound {
        /// Order ID.
        order_id: i64,
    },

    /// An order with the same ID is already stored.
    AlreadyExists {
        /// Order ID.
        order_id: i64,
    },

    /// The backing store failed.
    Storage {
        /// Error details.
        message: String,
    },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { field, message } => {
                write!(f, "Invalid order parameter '{field}': {message}")
            }
            Self::NotFound { order_id } => write!(f, "Order not found: {order_id}"),
            Self::AlreadyExists { order_id } => write!(f, "Order already exists: {order_id}"),
            Self::Storage { message } => write!(f, "Order store error: {message}"),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidValue { field, message } => {
                Self::InvalidParameters { field, message }
            }
            DomainError::InvariantViolation {
                aggregate,
                invariant,
            } => Self::InvalidParameters {
                field: aggregate,
                message: invariant,
            },
        }
    }
}
