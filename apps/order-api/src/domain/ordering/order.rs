//! Order entity.
//!
//! An order records that a client bought a quantity of one product at a
//! unit price. It is owned by this service's order store.

use crate::domain::shared::{ClientId, DomainError, Money, OrderId, ProductId, Timestamp};

/// Command to create an order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Store-assigned identifier.
    pub id: OrderId,
    /// Ordered product.
    pub product_id: ProductId,
    /// Ordering client.
    pub client_id: ClientId,
    /// Number of units purchased.
    pub purchase_quantity: u32,
    /// Unit price at the time the order was placed.
    pub price: Money,
    /// When the order was placed. Defaults to now (UTC).
    pub ordered_at: Option<Timestamp>,
}

/// An order owned by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    product_id: ProductId,
    client_id: ClientId,
    purchase_quantity: u32,
    price: Money,
    ordered_at: Timestamp,
}

impl Order {
    /// Create a validated order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if an identifier is not positive,
    /// the quantity is zero, or the price is negative.
    pub fn new(command: CreateOrderCommand) -> Result<Self, DomainError> {
        ensure_positive("id", command.id.value())?;
        ensure_positive("product_id", command.product_id.value())?;
        ensure_positive("client_id", command.client_id.value())?;

        if command.purchase_quantity == 0 {
            return Err(DomainError::InvalidValue {
                field: "purchase_quantity".to_string(),
                message: "must be positive".to_string(),
            });
        }
        command.price.ensure_non_negative("price")?;

        Ok(Self {
            id: command.id,
            product_id: command.product_id,
            client_id: command.client_id,
            purchase_quantity: command.purchase_quantity,
            price: command.price,
            ordered_at: command.ordered_at.unwrap_or_else(Timestamp::now),
        })
    }

    /// Order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Ordered product.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Ordering client.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Number of units purchased.
    #[must_use]
    pub const fn purchase_quantity(&self) -> u32 {
        self.purchase_quantity
    }

    /// Unit price recorded on the order.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// When the order was placed.
    #[must_use]
    pub const fn ordered_at(&self) -> Timestamp {
        self.ordered_at
    }
}

fn ensure_positive(field: &str, value: i64) -> Result<(), DomainError> {
    if value > 0 {
        Ok(())
    } else {
        Err(DomainError::InvalidValue {
            field: field.to_string(),
            message: format!("must be positive, got {value}"),
        })
    }
}
