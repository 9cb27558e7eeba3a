//! Ordering Bounded Context
//!
//! Orders owned by this service and the store abstraction used to resolve them.

pub mod errors;
pub mod order;
pub mod repository;

pub use errors::OrderError;
pub use order::{CreateOrderCommand, Order};
pub use repository::OrderRepository;
