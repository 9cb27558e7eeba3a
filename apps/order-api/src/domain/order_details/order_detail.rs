//! OrderDetail aggregate.
//!
//! Combines a local order with the product and client it references.
//! The only constructor takes all three sources, so a partially populated
//! detail cannot exist.

use super::snapshots::{ProductSnapshot, UserSnapshot};
use crate::domain::ordering::Order;
use crate::domain::shared::{ClientId, DomainError, Money, OrderId, ProductId, Timestamp};

/// Order detail assembled from the order, its product and its client.
///
/// Pricing uses the product's price at fetch time, not the price recorded
/// on the order: `total = product.unit_price × order.purchase_quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetail {
    order_id: OrderId,
    product_id: ProductId,
    client_id: ClientId,
    client_name: String,
    client_email: String,
    client_address: String,
    client_telephone_number: String,
    product_name: String,
    purchase_quantity: u32,
    unit_price: Money,
    total_price: Money,
    ordered_at: Timestamp,
}

impl OrderDetail {
    /// Compose the detail from its three resolved sources.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` if the product or user does
    /// not match the references recorded on the order, and
    /// `DomainError::InvalidValue` if the total does not fit in a `Decimal`.
    pub fn compose(
        order: &Order,
        product: ProductSnapshot,
        user: UserSnapshot,
    ) -> Result<Self, DomainError> {
        if product.id != order.product_id() {
            return Err(DomainError::InvariantViolation {
                aggregate: "OrderDetail".to_string(),
                invariant: format!(
                    "product {} does not match order product {}",
                    product.id,
                    order.product_id()
                ),
            });
        }
        if user.id != order.client_id() {
            return Err(DomainError::InvariantViolation {
                aggregate: "OrderDetail".to_string(),
                invariant: format!(
                    "user {} does not match order client {}",
                    user.id,
                    order.client_id()
                ),
            });
        }

        let unit_price = product.unit_price;
        let total_price = unit_price
            .times(order.purchase_quantity())
            .ok_or_else(|| DomainError::InvalidValue {
                field: "total_price".to_string(),
                message: format!(
                    "{} x {} overflows",
                    unit_price.amount(),
                    order.purchase_quantity()
                ),
            })?;

        Ok(Self {
            order_id: order.id(),
            product_id: product.id,
            client_id: user.id,
            client_name: user.name,
            client_email: user.email,
            client_address: user.address,
            client_telephone_number: user.telephone_number,
            product_name: product.name,
            purchase_quantity: order.purchase_quantity(),
            unit_price,
            total_price,
            ordered_at: order.ordered_at(),
        })
    }

    /// Order identifier.
    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Product identifier.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Client identifier.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Client display name.
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Client email.
    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Client postal address.
    #[must_use]
    pub fn client_address(&self) -> &str {
        &self.client_address
    }

    /// Client telephone number.
    #[must_use]
    pub fn client_telephone_number(&self) -> &str {
        &self.client_telephone_number
    }

    /// Product name.
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Purchased units.
    #[must_use]
    pub const fn purchase_quantity(&self) -> u32 {
        self.purchase_quantity
    }

    /// Unit price at fetch time.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Unit price × purchase quantity.
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    /// When the order was placed.
    #[must_use]
    pub const fn ordered_at(&self) -> Timestamp {
        self.ordered_at
    }
}
