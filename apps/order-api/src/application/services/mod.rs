//! Application Services
//!
//! Long-lived services that orchestrate ports and domain logic.

mod errors;
mod order_aggregator;
mod request_context;

pub use errors::{AggregationError, Dependency};
pub use order_aggregator::OrderAggregator;
pub use request_context::RequestContext;
