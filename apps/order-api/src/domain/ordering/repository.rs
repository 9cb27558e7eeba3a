//! Order Repository Trait
//!
//! Defines the persistence abstraction for orders.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::errors::OrderError;
use super::order::Order;
use crate::domain::shared::{ClientId, OrderId};

/// Repository trait for Order persistence.
///
/// The aggregator only reads through `find_by_id` and `find_by_client_id`;
/// the write operations serve the order service's own CRUD surface.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::AlreadyExists` if the ID is taken.
    async fn create(&self, order: &Order) -> Result<(), OrderError>;

    /// Replace an existing order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if no order has the ID.
    async fn update(&self, order: &Order) -> Result<(), OrderError>;

    /// Delete an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if no order has the ID.
    async fn delete(&self, id: OrderId) -> Result<(), OrderError>;

    /// Find an order by its ID.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError>;

    /// Find all orders placed by a client. May be empty.
    async fn find_by_client_id(&self, client_id: ClientId) -> Result<Vec<Order>, OrderError>;

    /// List every order.
    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;
}
