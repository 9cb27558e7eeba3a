//! Gateway adapter configuration.

use std::time::Duration;

/// Default header marking a request as signed by the gateway.
pub const DEFAULT_GATEWAY_HEADER: &str = "Api-Gateway";

/// Default value of the gateway marker header.
pub const DEFAULT_GATEWAY_SIGNATURE: &str = "SignedByApiGateway";

/// Header carrying the calling service's identity.
pub const CALLER_ID_HEADER: &str = "ClientId";

/// Default identity this service presents to the gateway.
pub const DEFAULT_CALLER_ID: &str = "order-api";

/// Configuration for the gateway HTTP adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL shared by every routed service.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Identity sent in the `ClientId` header.
    pub caller_id: String,
    /// Name of the gateway marker header.
    pub gateway_header_name: String,
    /// Value of the gateway marker header.
    pub gateway_header_value: String,
}

impl GatewayConfig {
    /// Create a configuration with default headers and a 30 second timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            caller_id: DEFAULT_CALLER_ID.to_string(),
            gateway_header_name: DEFAULT_GATEWAY_HEADER.to_string(),
            gateway_header_value: DEFAULT_GATEWAY_SIGNATURE.to_string(),
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the caller identity.
    #[must_use]
    pub fn with_caller_id(mut self, caller_id: impl Into<String>) -> Self {
        self.caller_id = caller_id.into();
        self
    }

    /// Override the gateway marker header.
    #[must_use]
    pub fn with_gateway_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.gateway_header_name = name.into();
        self.gateway_header_value = value.into();
        self
    }
}
