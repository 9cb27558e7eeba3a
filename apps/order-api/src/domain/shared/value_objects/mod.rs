//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod identifiers;
mod money;
mod timestamp;

pub use identifiers::{ClientId, OrderId, ProductId};
pub use money::Money;
pub use timestamp::Timestamp;
