//! Application Ports (Driven)
//!
//! Ports define how the aggregator reaches services it does not own.
//! Adapters live in the infrastructure layer.

mod product_catalog_port;
mod upstream_error;
mod user_directory_port;

pub use product_catalog_port::ProductCatalogPort;
pub use upstream_error::UpstreamError;
pub use user_directory_port::UserDirectoryPort;
