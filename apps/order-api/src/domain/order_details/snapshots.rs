//! Read-only snapshots of entities owned by other services.
//!
//! A snapshot is valid only "as of" the call that fetched it; nothing here
//! is cached between requests.

use crate::domain::shared::{ClientId, Money, ProductId};

/// A product as returned by the product service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current unit price.
    pub unit_price: Money,
    /// Units available in stock.
    pub available_quantity: i64,
}

/// A user (client) as returned by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    /// User identifier.
    pub id: ClientId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Telephone number.
    pub telephone_number: String,
}
