//! Retry policies with exponential backoff for remote service calls.
//!
//! A policy retries an operation while it fails with a transient error,
//! sleeping with bounded exponential backoff between attempts, and gives up
//! after `max_attempts` total attempts, surfacing the last failure.
//!
//! # Retryable Errors
//!
//! Classification belongs to the error type (see [`RetryClassify`]):
//!
//! | Transient | Terminal |
//! |-----------|----------|
//! | HTTP 5xx and other non-2xx statuses | HTTP 404 (entity does not exist) |
//! | Network timeouts, connection reset | Request could not be built |
//! | Malformed response payload | |
//!
//! # Example
//!
//! ```rust,ignore
//! use order_api::resilience::{RetryPolicy, ExponentialBackoffCalculator};
//!
//! let policy = RetryPolicy::default();
//! let mut backoff = ExponentialBackoffCalculator::new(&policy);
//!
//! let delay1 = backoff.next_backoff(); // 500ms
//! let delay2 = backoff.next_backoff(); // 1s
//! let delay3 = backoff.next_backoff(); // None: 3 attempts made
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use super::ResilienceError;

/// Error categories for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Error is expected to clear on its own; retry.
    Transient,
    /// Retrying cannot fix this error; propagate immediately.
    Terminal,
}

/// Errors that know whether they are worth retrying.
pub trait RetryClassify {
    /// Category used by [`RetryPolicy::execute`].
    fn category(&self) -> ErrorCategory;
}

/// Final failure of a guarded call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError<E>
where
    E: fmt::Display,
{
    /// A terminal failure bypassed retry.
    #[error("terminal failure on attempt {attempts}: {error}")]
    Terminal {
        /// Attempts made, including the failing one.
        attempts: u32,
        /// The terminal error.
        error: E,
    },

    /// Every attempt failed transiently.
    #[error("retries exhausted after {attempts} attempts: {last}")]
    Exhausted {
        /// Attempts made.
        attempts: u32,
        /// The last transient error.
        last: E,
    },
}

impl<E> RetryError<E>
where
    E: fmt::Display,
{
    /// Number of attempts made before giving up.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Terminal { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// The underlying error.
    #[must_use]
    pub fn into_inner(self) -> E {
        match self {
            Self::Terminal { error, .. } => error,
            Self::Exhausted { last, .. } => last,
        }
    }
}

/// Lifecycle of one guarded call.
///
/// `Idle → Attempting → {Success, TerminalFailure, RetryScheduled → Attempting, ExhaustedFailure}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// No attempt made yet.
    Idle,
    /// Attempt `n` (1-based) is in flight.
    Attempting(u32),
    /// Attempt failed transiently; the next one starts after the delay.
    RetryScheduled(Duration),
    /// The operation succeeded.
    Success,
    /// The operation failed with a terminal error.
    TerminalFailure,
    /// The last permitted attempt failed transiently.
    ExhaustedFailure,
}

impl AttemptState {
    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::TerminalFailure | Self::ExhaustedFailure
        )
    }

    /// Whether `next` is a legal successor of this state.
    #[must_use]
    pub const fn can_transition_to(&self, next: &Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle | Self::RetryScheduled(_), Self::Attempting(_))
                | (
                    Self::Attempting(_),
                    Self::Success
                        | Self::TerminalFailure
                        | Self::RetryScheduled(_)
                        | Self::ExhaustedFailure
                )
        )
    }
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Attempting(n) => write!(f, "ATTEMPTING({n})"),
            Self::RetryScheduled(delay) => write!(f, "RETRY_SCHEDULED({}ms)", delay.as_millis()),
            Self::Success => write!(f, "SUCCESS"),
            Self::TerminalFailure => write!(f, "TERMINAL_FAILURE"),
            Self::ExhaustedFailure => write!(f, "EXHAUSTED_FAILURE"),
        }
    }
}

/// Per-call attempt tracker. Owned by a single `execute` invocation.
#[derive(Debug)]
struct GuardedCall<'a> {
    operation: &'a str,
    state: AttemptState,
}

impl<'a> GuardedCall<'a> {
    const fn new(operation: &'a str) -> Self {
        Self {
            operation,
            state: AttemptState::Idle,
        }
    }

    fn transition(&mut self, next: AttemptState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!(
            operation = self.operation,
            from = %self.state,
            to = %next,
            "Guarded call transition"
        );
        self.state = next;
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first (default: 3).
    pub max_attempts: u32,
    /// Delay before the first retry (default: 500ms).
    pub initial_backoff: Duration,
    /// Upper bound for any single delay (default: 5s).
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential growth (default: 2.0).
    pub backoff_multiplier: f64,
    /// Jitter factor for randomization (default: 0.0 = none).
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter_factor: 0.0,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with custom settings.
    #[must_use]
    pub const fn new(
        max_attempts: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        backoff_multiplier: f64,
        jitter_factor: f64,
    ) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
            backoff_multiplier,
            jitter_factor,
        }
    }

    /// A policy with a fixed delay between attempts.
    #[must_use]
    pub const fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::new(max_attempts, delay, delay, 1.0, 0.0)
    }

    /// Check that the policy is bounded and well-formed.
    ///
    /// # Errors
    ///
    /// Returns `ResilienceError::InvalidPolicy` naming `name` and the offending field.
    pub fn validate(&self, name: &str) -> Result<(), ResilienceError> {
        let invalid = |reason: &str| ResilienceError::InvalidPolicy {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if self.max_attempts == 0 {
            return Err(invalid("max_attempts must be at least 1"));
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(invalid("backoff_multiplier must be >= 1.0"));
        }
        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err(invalid("jitter_factor must be between 0.0 and 1.0"));
        }
        if self.initial_backoff > self.max_backoff {
            return Err(invalid("initial_backoff must not exceed max_backoff"));
        }
        Ok(())
    }

    /// Run `operation` under this policy.
    ///
    /// Transient failures are retried until `max_attempts` is reached;
    /// terminal failures return immediately. Dropping the returned future
    /// cancels the in-flight attempt and any pending backoff.
    pub async fn execute<T, E, F, Fut>(
        &self,
        operation: &str,
        mut call: F,
    ) -> Result<T, RetryError<E>>
    where
        E: RetryClassify + fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut guarded = GuardedCall::new(operation);
        let mut backoff = ExponentialBackoffCalculator::new(self);
        let mut attempt = 0;

        loop {
            attempt += 1;
            guarded.transition(AttemptState::Attempting(attempt));

            let error = match call().await {
                Ok(value) => {
                    guarded.transition(AttemptState::Success);
                    if attempt > 1 {
                        tracing::debug!(operation, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            if error.category() == ErrorCategory::Terminal {
                guarded.transition(AttemptState::TerminalFailure);
                tracing::debug!(operation, attempt, error = %error, "Terminal failure, not retrying");
                return Err(RetryError::Terminal {
                    attempts: attempt,
                    error,
                });
            }

            let Some(delay) = backoff.next_backoff() else {
                guarded.transition(AttemptState::ExhaustedFailure);
                tracing::warn!(
                    operation,
                    attempts = attempt,
                    error = %error,
                    "Retries exhausted"
                );
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: error,
                });
            };

            guarded.transition(AttemptState::RetryScheduled(delay));
            tracing::warn!(
                operation,
                error = %error,
                delay_ms = delay.as_millis(),
                attempt,
                "Transient failure, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// Calculator for exponential backoff with jitter.
#[derive(Debug)]
pub struct ExponentialBackoffCalculator {
    current_retry: u32,
    max_retries: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
    backoff_multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoffCalculator {
    /// Create a new backoff calculator from a retry policy.
    #[must_use]
    pub const fn new(policy: &RetryPolicy) -> Self {
        Self {
            current_retry: 0,
            max_retries: policy.max_attempts.saturating_sub(1),
            initial_backoff_ms: policy.initial_backoff.as_millis() as u64,
            max_backoff_ms: policy.max_backoff.as_millis() as u64,
            backoff_multiplier: policy.backoff_multiplier,
            jitter_factor: policy.jitter_factor,
        }
    }

    /// Get the delay before the next retry.
    ///
    /// Returns `None` once the policy's attempts are used up.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.current_retry >= self.max_retries {
            return None;
        }

        let base_backoff_ms = self.calculate_base_backoff_ms();
        let jittered_ms = self.apply_jitter(base_backoff_ms);
        let capped_ms = jittered_ms.min(self.max_backoff_ms);

        self.current_retry += 1;

        Some(Duration::from_millis(capped_ms))
    }

    /// Calculate base exponential backoff without jitter.
    fn calculate_base_backoff_ms(&self) -> u64 {
        let multiplier = self.backoff_multiplier.powi(self.current_retry as i32);
        let backoff = (self.initial_backoff_ms as f64 * multiplier) as u64;
        backoff.min(self.max_backoff_ms)
    }

    /// Random value in [backoff * (1 - jitter), backoff * (1 + jitter)].
    fn apply_jitter(&self, backoff_ms: u64) -> u64 {
        if self.jitter_factor <= 0.0 || backoff_ms == 0 {
            return backoff_ms;
        }

        let mut rng = rand::rng();
        let jitter_range = backoff_ms as f64 * self.jitter_factor;
        let min = (backoff_ms as f64 - jitter_range).max(0.0);
        let max = backoff_ms as f64 + jitter_range;

        rng.random_range(min..=max) as u64
    }

    /// Retries handed out so far.
    #[must_use]
    pub const fn current_retry(&self) -> u32 {
        self.current_retry
    }

    /// Check if more retries are available.
    #[must_use]
    pub const fn has_remaining_attempts(&self) -> bool {
        self.current_retry < self.max_retries
    }
}
