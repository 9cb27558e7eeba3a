//! Aggregation configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Aggregation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Deadline for one aggregation when the caller sets none (milliseconds).
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl AggregationConfig {
    /// Default request deadline, if configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
