//! Strongly-typed identifiers for domain entities.
//!
//! Every service in the platform keys its records by a database-assigned
//! integer. The newtypes prevent passing a product id where a client id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new identifier from its raw value.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the raw value.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Store-assigned identifiers start at 1.
            #[must_use]
            pub const fn is_valid(&self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(OrderId, "Identifier of an order owned by this service.");
define_id!(ProductId, "Identifier of a product owned by the product service.");
define_id!(
    ClientId,
    "Identifier of a client (user) owned by the authentication service."
);
