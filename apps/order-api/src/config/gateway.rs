//! Gateway configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::gateway::{
    DEFAULT_CALLER_ID, DEFAULT_GATEWAY_HEADER, DEFAULT_GATEWAY_SIGNATURE, GatewayConfig,
};

/// Where and how the remote services are reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Base URL of the API gateway.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Identity presented in the `ClientId` header.
    #[serde(default = "default_caller_id")]
    pub caller_id: String,
    /// Name of the gateway marker header.
    #[serde(default = "default_gateway_header_name")]
    pub gateway_header_name: String,
    /// Value of the gateway marker header.
    #[serde(default = "default_gateway_header_value")]
    pub gateway_header_value: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            caller_id: default_caller_id(),
            gateway_header_name: default_gateway_header_name(),
            gateway_header_value: default_gateway_header_value(),
        }
    }
}

impl GatewaySettings {
    /// Convert to the adapter's `GatewayConfig`.
    #[must_use]
    pub fn to_gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(self.base_url.clone())
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_caller_id(self.caller_id.clone())
            .with_gateway_header(
                self.gateway_header_name.clone(),
                self.gateway_header_value.clone(),
            )
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_caller_id() -> String {
    DEFAULT_CALLER_ID.to_string()
}

fn default_gateway_header_name() -> String {
    DEFAULT_GATEWAY_HEADER.to_string()
}

fn default_gateway_header_value() -> String {
    DEFAULT_GATEWAY_SIGNATURE.to_string()
}
