//! Application Layer
//!
//! The application layer orchestrates domain logic. It defines:
//!
//! - **Ports**: Interfaces for the remote product and user services
//! - **Services**: The order-detail aggregator
//! - **DTOs**: Outbound representations of orders and order details

pub mod dto;
pub mod ports;
pub mod services;

pub use dto::*;
pub use ports::*;
pub use services::*;
