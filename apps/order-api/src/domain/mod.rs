//! Domain Layer
//!
//! The innermost layer containing business types with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Entities**: The locally owned `Order`
//! - **Value Objects**: Identifiers, money, timestamps, remote snapshots
//! - **Aggregates**: `OrderDetail`, derived per request and never persisted
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`ordering`]: Orders owned by this service and the order store port
//! - [`order_details`]: Product/user snapshots and the composed order detail

pub mod order_details;
pub mod ordering;
pub mod shared;
