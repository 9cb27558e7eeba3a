//! User Directory Port (Driven Port)
//!
//! Interface for reading clients from the remote authentication service.

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::order_details::UserSnapshot;
use crate::domain::shared::ClientId;

/// Port for client lookups.
#[async_trait]
pub trait UserDirectoryPort: Send + Sync {
    /// Fetch the current state of a client. Single attempt.
    async fn fetch_user(&self, id: ClientId) -> Result<UserSnapshot, UpstreamError>;
}
