//! API Gateway Adapter
//!
//! Reaches the product and authentication services through the shared
//! gateway with:
//! - Gateway marker and caller identity headers on every request
//! - One attempt per call, classified for the retry policy
//! - Payload validation against the requested ID

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::{GatewayServiceClient, PRODUCTS_ROUTE, USERS_ROUTE};
pub use config::{
    CALLER_ID_HEADER, DEFAULT_CALLER_ID, DEFAULT_GATEWAY_HEADER, DEFAULT_GATEWAY_SIGNATURE,
    GatewayConfig,
};
pub use error::GatewayError;
pub use http_client::GatewayHttpClient;
