//! Data Transfer Objects (DTOs)
//!
//! Outbound representations returned to callers of the aggregator.

mod order_dto;

pub use order_dto::{OrderDetailDto, OrderDto};
