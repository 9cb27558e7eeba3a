//! Named retry policy configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::resilience::{PolicyRegistry, RETRY_POLICY, ResilienceError, RetryPolicy};

/// Resilience configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResilienceConfig {
    /// Policies by name. Must contain `"retry"`.
    #[serde(default = "default_policies")]
    pub policies: BTreeMap<String, RetryPolicySettings>,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            policies: default_policies(),
        }
    }
}

impl ResilienceConfig {
    /// Validate every policy and freeze them into a registry.
    ///
    /// # Errors
    ///
    /// Returns `ResilienceError` if a policy is invalid or `"retry"` is missing.
    pub fn build_registry(&self) -> Result<PolicyRegistry, ResilienceError> {
        self.policies
            .iter()
            .try_fold(PolicyRegistry::builder(), |builder, (name, settings)| {
                builder.register(name.clone(), settings.to_retry_policy())
            })?
            .build()
    }
}

/// Settings of one retry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicySettings {
    /// Total attempts, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry (milliseconds).
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Upper bound on any delay (milliseconds).
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Growth factor between consecutive delays.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Randomization of each delay, 0.0 to 1.0.
    #[serde(default)]
    pub jitter_factor: f64,
}

impl Default for RetryPolicySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            multiplier: default_multiplier(),
            jitter_factor: 0.0,
        }
    }
}

impl RetryPolicySettings {
    /// Convert config settings to the resilience module's `RetryPolicy`.
    #[must_use]
    pub const fn to_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
            self.multiplier,
            self.jitter_factor,
        )
    }
}

fn default_policies() -> BTreeMap<String, RetryPolicySettings> {
    BTreeMap::from([(RETRY_POLICY.to_string(), RetryPolicySettings::default())])
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    500
}

const fn default_max_backoff_ms() -> u64 {
    5_000
}

const fn default_multiplier() -> f64 {
    2.0
}
