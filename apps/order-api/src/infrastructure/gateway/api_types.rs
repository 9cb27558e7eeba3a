//! Wire types of the product and authentication services.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::order_details::{ProductSnapshot, UserSnapshot};
use crate::domain::shared::{ClientId, Money, ProductId};

/// `GET /api/products/{id}` response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Product ID.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Units in stock.
    pub quantity: i64,
    /// Current unit price. Accepts JSON numbers and strings.
    pub price: Decimal,
}

impl From<ProductResponse> for ProductSnapshot {
    fn from(response: ProductResponse) -> Self {
        Self {
            id: ProductId::new(response.id),
            name: response.name,
            unit_price: Money::new(response.price),
            available_quantity: response.quantity,
        }
    }
}

/// `GET /api/authentication/{id}` response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUserResponse {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Telephone number.
    #[serde(default)]
    pub telephone_number: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Email.
    pub email: String,
    /// Role; unused by the order service.
    #[serde(default)]
    pub role: Option<String>,
}

impl From<AppUserResponse> for UserSnapshot {
    fn from(response: AppUserResponse) -> Self {
        Self {
            id: ClientId::new(response.id),
            name: response.name,
            email: response.email,
            address: response.address,
            telephone_number: response.telephone_number,
        }
    }
}
