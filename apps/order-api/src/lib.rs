// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order API - Rust Core Library
//!
//! Order detail aggregation for the e-commerce order service.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business types with no infrastructure dependencies
//!   - `ordering`: Order entity and the order store port
//!   - `order_details`: Product/user snapshots and the `OrderDetail` aggregate
//!
//! - **Application**: Orchestration
//!   - `ports`: Interfaces for remote services (`ProductCatalogPort`, `UserDirectoryPort`)
//!   - `services`: `OrderAggregator`
//!   - `dto`: Outbound representations
//!
//! - **Resilience**: Named retry policies with bounded exponential backoff
//!
//! - **Infrastructure**: Adapters
//!   - `gateway`: HTTP client for gateway-routed product and user services
//!   - `persistence`: In-memory order store

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Orchestration and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Logging initialization.
pub mod observability;

/// Retry policies and the named policy registry.
pub mod resilience;

// =============================================================================
// Re-exports
// =============================================================================

pub use domain::order_details::{OrderDetail, ProductSnapshot, UserSnapshot};
pub use domain::ordering::{Order, OrderError, OrderRepository};
pub use domain::shared::{ClientId, Money, OrderId, ProductId, Timestamp};

pub use application::dto::{OrderDetailDto, OrderDto};
pub use application::ports::{ProductCatalogPort, UpstreamError, UserDirectoryPort};
pub use application::services::{AggregationError, Dependency, OrderAggregator, RequestContext};

pub use infrastructure::gateway::{GatewayConfig, GatewayError, GatewayServiceClient};
pub use infrastructure::persistence::InMemoryOrderRepository;

pub use resilience::{PolicyRegistry, RETRY_POLICY, RetryPolicy};
