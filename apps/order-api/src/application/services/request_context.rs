//! Per-request bounds supplied by the caller.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Request ID, deadline and cancellation for one aggregation.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    deadline: Option<Duration>,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Unbounded context with a fresh request ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            deadline: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Bound the whole aggregation by `deadline`, measured from the call.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abort the aggregation when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Use a caller-supplied request ID for log correlation.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Request ID.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Time budget, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Cancellation token.
    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
