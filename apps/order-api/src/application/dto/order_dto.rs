//! Order DTOs
//!
//! Monetary fields are serialized as decimal strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_details::OrderDetail;
use crate::domain::ordering::Order;
use crate::domain::shared::Timestamp;

/// DTO representing a stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDto {
    /// Order ID.
    pub id: i64,
    /// Product ID.
    pub product_id: i64,
    /// Client ID.
    pub client_id: i64,
    /// Units purchased.
    pub purchase_quantity: u32,
    /// Unit price recorded on the order.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    /// When the order was placed.
    pub order_date: Timestamp,
}

impl OrderDto {
    /// Create from domain Order.
    #[must_use]
    pub fn from_domain(order: &Order) -> Self {
        Self {
            id: order.id().value(),
            product_id: order.product_id().value(),
            client_id: order.client_id().value(),
            purchase_quantity: order.purchase_quantity(),
            price: order.price().amount(),
            order_date: order.ordered_at(),
        }
    }
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self::from_domain(order)
    }
}

/// DTO representing an assembled order detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailDto {
    /// Order ID.
    pub order_id: i64,
    /// Product ID.
    pub product_id: i64,
    /// Client ID.
    pub client_id: i64,
    /// Client name.
    pub client_name: String,
    /// Client email.
    pub client_email: String,
    /// Client address.
    pub client_address: String,
    /// Client telephone number.
    pub client_telephone_number: String,
    /// Product name.
    pub product_name: String,
    /// Units purchased.
    pub purchase_quantity: u32,
    /// Product price at fetch time.
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    /// Unit price × purchase quantity.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    /// When the order was placed.
    pub order_date: Timestamp,
}

impl OrderDetailDto {
    /// Create from the domain aggregate.
    #[must_use]
    pub fn from_domain(detail: &OrderDetail) -> Self {
        Self {
            order_id: detail.order_id().value(),
            product_id: detail.product_id().value(),
            client_id: detail.client_id().value(),
            client_name: detail.client_name().to_string(),
            client_email: detail.client_email().to_string(),
            client_address: detail.client_address().to_string(),
            client_telephone_number: detail.client_telephone_number().to_string(),
            product_name: detail.product_name().to_string(),
            purchase_quantity: detail.purchase_quantity(),
            unit_price: detail.unit_price().amount(),
            total_price: detail.total_price().amount(),
            order_date: detail.ordered_at(),
        }
    }
}

impl From<&OrderDetail> for OrderDetailDto {
    fn from(detail: &OrderDetail) -> Self {
        Self::from_domain(detail)
    }
}
