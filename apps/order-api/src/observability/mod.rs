//! Observability for the order API.
//!
//! Logging goes through `tracing`; this module installs the subscriber.

mod tracing;

pub use self::tracing::{TracingError, build_filter, init_tracing};
