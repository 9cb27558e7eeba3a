//! Order Aggregator
//!
//! Resolves an order locally, then fetches its product and its client from
//! the remote services concurrently, each under the `"retry"` policy, and
//! composes the [`OrderDetail`] aggregate.

use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use super::errors::{AggregationError, Dependency};
use super::request_context::RequestContext;
use crate::application::dto::OrderDto;
use crate::application::ports::{ProductCatalogPort, UserDirectoryPort};
use crate::domain::order_details::OrderDetail;
use crate::domain::ordering::OrderRepository;
use crate::domain::shared::{ClientId, OrderId};
use crate::resilience::{PolicyRegistry, RETRY_POLICY, RetryPolicy};

/// Aggregates orders with their product and client.
pub struct OrderAggregator<O, P, U>
where
    O: OrderRepository,
    P: ProductCatalogPort,
    U: UserDirectoryPort,
{
    orders: Arc<O>,
    products: Arc<P>,
    users: Arc<U>,
    retry_policy: Arc<RetryPolicy>,
    default_deadline: Option<Duration>,
}

impl<O, P, U> OrderAggregator<O, P, U>
where
    O: OrderRepository,
    P: ProductCatalogPort,
    U: UserDirectoryPort,
{
    /// Create a new `OrderAggregator`, resolving the retry policy once.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError::Resilience` if the registry has no
    /// `"retry"` policy.
    pub fn new(
        orders: Arc<O>,
        products: Arc<P>,
        users: Arc<U>,
        policies: &PolicyRegistry,
    ) -> Result<Self, AggregationError> {
        Ok(Self {
            orders,
            products,
            users,
            retry_policy: policies.get_policy(RETRY_POLICY)?,
            default_deadline: None,
        })
    }

    /// Deadline applied when the caller's context has none.
    #[must_use]
    pub const fn with_default_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.default_deadline = deadline;
        self
    }

    /// Assemble the detail for one order.
    pub async fn get_order_details(
        &self,
        order_id: OrderId,
    ) -> Result<OrderDetail, AggregationError> {
        self.get_order_details_with(order_id, &RequestContext::new())
            .await
    }

    /// Assemble the detail for one order within the caller's bounds.
    ///
    /// When the deadline elapses or the token is cancelled, the in-flight
    /// fetches and any pending backoff are dropped.
    pub async fn get_order_details_with(
        &self,
        order_id: OrderId,
        ctx: &RequestContext,
    ) -> Result<OrderDetail, AggregationError> {
        let span = tracing::info_span!(
            "order_details",
            request_id = %ctx.request_id(),
            order_id = %order_id
        );

        async move {
            let deadline = ctx.deadline().or(self.default_deadline);
            let bounded = async {
                match deadline {
                    Some(budget) => {
                        match tokio::time::timeout(budget, self.aggregate(order_id)).await {
                            Ok(result) => result,
                            Err(_) => Err(AggregationError::DeadlineExceeded { elapsed: budget }),
                        }
                    }
                    None => self.aggregate(order_id).await,
                }
            };

            let result = tokio::select! {
                biased;
                () = ctx.cancellation().cancelled() => Err(AggregationError::Cancelled),
                result = bounded => result,
            };

            match &result {
                Ok(detail) => tracing::info!(
                    total = %detail.total_price(),
                    "Order details assembled"
                ),
                Err(e) => tracing::warn!(code = e.code(), error = %e, "Order details failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// All orders placed by a client, oldest first.
    pub async fn get_orders_by_client_id(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<OrderDto>, AggregationError> {
        if !client_id.is_valid() {
            return Err(AggregationError::NoOrdersFound { client_id });
        }

        let mut orders = self.orders.find_by_client_id(client_id).await?;
        if orders.is_empty() {
            return Err(AggregationError::NoOrdersFound { client_id });
        }

        orders.sort_by_key(|order| (order.ordered_at(), order.id()));
        tracing::debug!(%client_id, count = orders.len(), "Orders listed for client");
        Ok(orders.iter().map(OrderDto::from_domain).collect())
    }

    async fn aggregate(&self, order_id: OrderId) -> Result<OrderDetail, AggregationError> {
        if !order_id.is_valid() {
            return Err(AggregationError::OrderNotFound { order_id });
        }

        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(AggregationError::OrderNotFound { order_id })?;

        let product_id = order.product_id();
        let client_id = order.client_id();
        let products = &self.products;
        let users = &self.users;

        let (product, user) = tokio::join!(
            self.retry_policy
                .execute("fetch_product", move || products.fetch_product(product_id)),
            self.retry_policy
                .execute("fetch_user", move || users.fetch_user(client_id)),
        );

        // Product failure wins when both fail.
        let product = product.map_err(|e| {
            AggregationError::from_upstream(Dependency::Product, product_id.value(), e)
        })?;
        let user = user
            .map_err(|e| AggregationError::from_upstream(Dependency::User, client_id.value(), e))?;

        OrderDetail::compose(&order, product, user).map_err(|e| AggregationError::Inconsistent {
            reason: e.to_string(),
        })
    }
}
