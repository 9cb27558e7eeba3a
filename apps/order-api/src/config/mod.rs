//! Configuration module for the order API.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before any adapter is built.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_api::config::load_config;
//!
//! let config = load_config(Some("config.yaml"))?;
//! let registry = config.resilience.build_registry()?;
//! let gateway = config.gateway.to_gateway_config();
//! ```

mod aggregation;
mod gateway;
mod observability;
mod resilience;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use aggregation::AggregationConfig;
pub use gateway::GatewaySettings;
pub use observability::{LOG_FORMATS, LoggingConfig, ObservabilityConfig};
pub use resilience::{ResilienceConfig, RetryPolicySettings};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API gateway configuration.
    #[serde(default)]
    pub gateway: GatewaySettings,
    /// Named retry policies.
    #[serde(default)]
    pub resilience: ResilienceConfig,
    /// Aggregation configuration.
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// `path` defaults to `config.yaml`.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become empty strings.
#[allow(clippy::expect_used)] // Regex is compile-time constant
pub fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` describing the first problem found.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.gateway.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "gateway.base_url must not be empty".to_string(),
        ));
    }
    match Url::parse(base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(_) => {
            return Err(ConfigError::ValidationError(format!(
                "gateway.base_url '{base_url}' must use http or https"
            )));
        }
        Err(e) => {
            return Err(ConfigError::ValidationError(format!(
                "gateway.base_url '{base_url}' is invalid: {e}"
            )));
        }
    }

    if config.gateway.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "gateway.timeout_ms must be positive".to_string(),
        ));
    }

    if config.gateway.caller_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "gateway.caller_id must not be empty".to_string(),
        ));
    }

    if config.aggregation.request_timeout_ms == Some(0) {
        return Err(ConfigError::ValidationError(
            "aggregation.request_timeout_ms must be positive when set".to_string(),
        ));
    }

    config
        .resilience
        .build_registry()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    let format = config.observability.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}
