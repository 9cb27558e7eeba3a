//! Order Details Bounded Context
//!
//! Point-in-time snapshots of remote-owned entities and the aggregate
//! composed from them.

mod order_detail;
mod snapshots;

pub use order_detail::OrderDetail;
pub use snapshots::{ProductSnapshot, UserSnapshot};
