//! Gateway adapter implementing the product and user ports.

use async_trait::async_trait;

use crate::application::ports::{ProductCatalogPort, UpstreamError, UserDirectoryPort};
use crate::domain::order_details::{ProductSnapshot, UserSnapshot};
use crate::domain::shared::{ClientId, Money, ProductId};

use super::api_types::{AppUserResponse, ProductResponse};
use super::config::GatewayConfig;
use super::error::GatewayError;
use super::http_client::GatewayHttpClient;

/// Route of the product service behind the gateway.
pub const PRODUCTS_ROUTE: &str = "api/products";

/// Route of the authentication (user) service behind the gateway.
pub const USERS_ROUTE: &str = "api/authentication";

/// Remote service client for the product and user services.
///
/// Implements `ProductCatalogPort` and `UserDirectoryPort` over one shared
/// HTTP connection pool.
#[derive(Debug, Clone)]
pub struct GatewayServiceClient {
    client: GatewayHttpClient,
}

impl GatewayServiceClient {
    /// Create a new gateway client.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            client: GatewayHttpClient::new(config)?,
        })
    }

    /// Fetch a product.
    pub async fn get_product(&self, id: ProductId) -> Result<ProductSnapshot, GatewayError> {
        let response: ProductResponse = self
            .client
            .get_json(&format!("{PRODUCTS_ROUTE}/{id}"))
            .await?;

        if response.id != id.value() {
            return Err(GatewayError::UnexpectedEntity {
                resource: "product",
                expected: id.value(),
                actual: response.id,
            });
        }
        Money::new(response.price)
            .ensure_non_negative("price")
            .map_err(|e| GatewayError::InvalidPayload {
                resource: "product",
                message: e.to_string(),
            })?;
        Ok(response.into())
    }

    /// Fetch a user.
    pub async fn get_user(&self, id: ClientId) -> Result<UserSnapshot, GatewayError> {
        let response: AppUserResponse = self
            .client
            .get_json(&format!("{USERS_ROUTE}/{id}"))
            .await?;

        if response.id != id.value() {
            return Err(GatewayError::UnexpectedEntity {
                resource: "user",
                expected: id.value(),
                actual: response.id,
            });
        }
        Ok(response.into())
    }
}

#[async_trait]
impl ProductCatalogPort for GatewayServiceClient {
    async fn fetch_product(&self, id: ProductId) -> Result<ProductSnapshot, UpstreamError> {
        tracing::debug!(product_id = %id, "Fetching product");
        self.get_product(id).await.map_err(|e| {
            tracing::debug!(product_id = %id, error = %e, "Product fetch failed");
            e.into()
        })
    }
}

#[async_trait]
impl UserDirectoryPort for GatewayServiceClient {
    async fn fetch_user(&self, id: ClientId) -> Result<UserSnapshot, UpstreamError> {
        tracing::debug!(user_id = %id, "Fetching user");
        self.get_user(id).await.map_err(|e| {
            tracing::debug!(user_id = %id, error = %e, "User fetch failed");
            e.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> GatewayServiceClient {
        GatewayServiceClient::new(&GatewayConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn fetches_product_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "name": "Keyboard",
                "quantity": 40,
                "price": 25.00
            })))
            .expect(1)
            .mount(&server)
            .await;

        let product = client(&server)
            .fetch_product(ProductId::new(3))
            .await
            .unwrap();

        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.name, "Keyboard");
        assert_eq!(product.unit_price.amount(), dec!(25));
    }

    #[tokio::test]
    async fn fetches_user_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/authentication/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 9,
                "name": "Ada",
                "telephoneNumber": "555-0101",
                "address": "12 Analytical Row",
                "email": "ada@example.com",
                "role": "Customer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client(&server)
            .fetch_user(ClientId::new(9))
            .await
            .unwrap();

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.telephone_number, "555-0101");
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/3"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_product(ProductId::new(3))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn server_errors_are_transient() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_user(ClientId::new(9))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Transient {
                message: "HTTP 500".to_string(),
                status: Some(500)
            }
        );
    }

    #[tokio::test]
    async fn mismatched_id_is_transient() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4,
                "name": "Mouse",
                "quantity": 1,
                "price": "9.99"
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_product(ProductId::new(3))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Transient { status: None, .. }));
    }

    #[tokio::test]
    async fn negative_price_is_transient() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "name": "Keyboard",
                "quantity": 40,
                "price": "-25.00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_product(ProductId::new(3))
            .await
            .unwrap_err();
        match err {
            UpstreamError::Transient { message, status } => {
                assert!(message.contains("must not be negative"));
                assert!(status.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn incomplete_payload_is_transient() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/authentication/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 9 })))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_user(ClientId::new(9))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Transient { .. }));
    }
}
