//! Persistence Adapters
//!
//! Implementations of the order store port.

pub mod in_memory;

pub use in_memory::InMemoryOrderRepository;
