//! Process-wide registry of named retry policies.

use std::collections::HashMap;
use std::sync::Arc;

use super::ResilienceError;
use super::retry::RetryPolicy;

/// Name of the policy that guards remote fetches.
pub const RETRY_POLICY: &str = "retry";

/// Immutable mapping from policy name to policy.
///
/// Built once and shared behind an `Arc`; lookups take `&self` only, so
/// concurrent requests never contend.
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    policies: HashMap<String, Arc<RetryPolicy>>,
}

impl PolicyRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> PolicyRegistryBuilder {
        PolicyRegistryBuilder::default()
    }

    /// A registry holding only the default `"retry"` policy.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut policies = HashMap::new();
        policies.insert(RETRY_POLICY.to_string(), Arc::new(RetryPolicy::default()));
        Self { policies }
    }

    /// Look up a policy by name.
    ///
    /// # Errors
    ///
    /// Returns `ResilienceError::UnknownPolicy` if nothing is registered under `name`.
    pub fn get_policy(&self, name: &str) -> Result<Arc<RetryPolicy>, ResilienceError> {
        self.policies
            .get(name)
            .map(Arc::clone)
            .ok_or_else(|| ResilienceError::UnknownPolicy {
                name: name.to_string(),
            })
    }

    /// Registered policy names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.policies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Builder for [`PolicyRegistry`].
#[derive(Debug, Default)]
pub struct PolicyRegistryBuilder {
    policies: HashMap<String, Arc<RetryPolicy>>,
}

impl PolicyRegistryBuilder {
    /// Register `policy` under `name`, replacing any earlier registration.
    ///
    /// # Errors
    ///
    /// Returns `ResilienceError::InvalidPolicy` if the policy fails validation.
    pub fn register(
        mut self,
        name: impl Into<String>,
        policy: RetryPolicy,
    ) -> Result<Self, ResilienceError> {
        let name = name.into();
        policy.validate(&name)?;
        self.policies.insert(name, Arc::new(policy));
        Ok(self)
    }

    /// Freeze the registry.
    ///
    /// # Errors
    ///
    /// Returns `ResilienceError::MissingRetryPolicy` if `"retry"` was never registered.
    pub fn build(self) -> Result<PolicyRegistry, ResilienceError> {
        if !self.policies.contains_key(RETRY_POLICY) {
            return Err(ResilienceError::MissingRetryPolicy);
        }
        Ok(PolicyRegistry {
            policies: self.policies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults_expose_retry_policy() {
        let registry = PolicyRegistry::with_defaults();
        let policy = registry.get_policy(RETRY_POLICY).unwrap();
        assert_eq!(*policy, RetryPolicy::default());
        assert_eq!(registry.names(), vec!["retry"]);
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let registry = PolicyRegistry::with_defaults();
        let err = registry.get_policy("circuit").unwrap_err();
        assert_eq!(
            err,
            ResilienceError::UnknownPolicy {
                name: "circuit".to_string()
            }
        );
    }

    #[test]
    fn builder_registers_named_policies() {
        let registry = PolicyRegistry::builder()
            .register(RETRY_POLICY, RetryPolicy::fixed(2, Duration::from_millis(50)))
            .unwrap()
            .register("patient", RetryPolicy::fixed(8, Duration::from_secs(1)))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(registry.get_policy(RETRY_POLICY).unwrap().max_attempts, 2);
        assert_eq!(registry.get_policy("patient").unwrap().max_attempts, 8);
        assert_eq!(registry.names(), vec!["patient", "retry"]);
    }

    #[test]
    fn builder_requires_retry_policy() {
        let result = PolicyRegistry::builder()
            .register("patient", RetryPolicy::default())
            .unwrap()
            .build();
        assert_eq!(result.unwrap_err(), ResilienceError::MissingRetryPolicy);
    }

    #[test]
    fn builder_rejects_invalid_policy() {
        let result = PolicyRegistry::builder().register(
            RETRY_POLICY,
            RetryPolicy {
                max_attempts: 0,
                ..RetryPolicy::default()
            },
        );
        assert!(matches!(
            result,
            Err(ResilienceError::InvalidPolicy { ref name, .. }) if name == "retry"
        ));
    }

    #[test]
    fn lookups_share_the_same_policy() {
        let registry = PolicyRegistry::with_defaults();
        let a = registry.get_policy(RETRY_POLICY).unwrap();
        let b = registry.get_policy(RETRY_POLICY).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn registry_is_shareable_across_tasks() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PolicyRegistry>();
    }
}
