//! Structured logging setup.
//!
//! # Example
//!
//! ```ignore
//! use order_api::config::LoggingConfig;
//! use order_api::observability::init_tracing;
//!
//! init_tracing(&LoggingConfig::default())?;
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Error type for tracing setup.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// Offending directive.
        directive: String,
        /// Parser message.
        message: String,
    },
}

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
///
/// # Errors
///
/// Returns `TracingError::InvalidFilter` if the configured level does not parse.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TracingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| TracingError::InvalidFilter {
        directive: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global `fmt` subscriber.
///
/// Returns `Ok(false)` when a global subscriber is already installed, so
/// repeated calls (tests, embedding hosts) are harmless.
///
/// # Errors
///
/// Returns `TracingError::InvalidFilter` if the configured level does not parse.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool, TracingError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    };
    Ok(installed.is_ok())
}
