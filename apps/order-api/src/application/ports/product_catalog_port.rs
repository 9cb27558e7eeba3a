//! Product Catalog Port (Driven Port)
//!
//! Interface for reading products from the remote product service.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::order_details::ProductSnapshot;
use crate::domain::shared::ProductId;

/// Port for product lookups.
///
/// One call is one remote attempt. Retrying is the caller's business.
#[async_trait]
pub trait ProductCatalogPort: Send + Sync {
    /// Fetch the current state of a product.
    async fn fetch_product(&self, id: ProductId) -> Result<ProductSnapshot, UpstreamError>;
}
