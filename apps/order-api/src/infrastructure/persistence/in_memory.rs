//! In-memory order store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ordering::{Order, OrderError, OrderRepository};
use crate::domain::shared::{ClientId, OrderId};

/// In-memory implementation of `OrderRepository`.
///
/// Suitable for testing and local development.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, Order>>,
}

fn poisoned<T>(_: PoisonError<T>) -> OrderError {
    OrderError::Storage {
        message: "order store lock poisoned".to_string(),
    }
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }

    /// Create a repository pre-loaded with `orders`, keyed by ID.
    #[must_use]
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: RwLock::new(orders.into_iter().map(|o| (o.id(), o)).collect()),
        }
    }

    /// Number of stored orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.read().map_or(0, |orders| orders.len())
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        if orders.contains_key(&order.id()) {
            return Err(OrderError::AlreadyExists {
                order_id: order.id().value(),
            });
        }
        orders.insert(order.id(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), OrderError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        match orders.get_mut(&order.id()) {
            Some(existing) => {
                *existing = order.clone();
                Ok(())
            }
            None => Err(OrderError::NotFound {
                order_id: order.id().value(),
            }),
        }
    }

    async fn delete(&self, id: OrderId) -> Result<(), OrderError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        orders
            .remove(&id)
            .map(|_| ())
            .ok_or(OrderError::NotFound {
                order_id: id.value(),
            })
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.get(&id).cloned())
    }

    async fn find_by_client_id(&self, client_id: ClientId) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders
            .values()
            .filter(|o| o.client_id() == client_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let orders = self.orders.read().map_err(poisoned)?;
        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by_key(Order::id);
        Ok(all)
    }
}
