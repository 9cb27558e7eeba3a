//! Infrastructure Layer
//!
//! Adapters implementing the ports defined in the domain and application
//! layers:
//!
//! - `gateway/`: HTTP adapter for the product and user services, reached
//!   through the API gateway
//! - `persistence/`: Order store adapters

pub mod gateway;
pub mod persistence;
