// crates/admin-settings-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: Installs the tracing subscriber for the CLI process.
// Purpose: Route engine diagnostics to stderr as text or JSON.
// Dependencies: admin-settings-config, thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Diagnostics go to stderr so command output on stdout stays parseable.
//! The filter comes from [`LOG_ENV_VAR`] when set, otherwise from the
//! `[logging]` level in the configuration file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use admin_settings_config::LogFormat;
use admin_settings_config::LoggingConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding a filter directive.
pub const LOG_ENV_VAR: &str = "ADMIN_SETTINGS_LOG";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Logging setup failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive does not parse.
    #[error("invalid log filter {directive}: {message}")]
    Filter {
        /// Offending directive.
        directive: String,
        /// Parser error text.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    Install(String),
}

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Builds the filter from an override directive or the configured level.
///
/// # Errors
///
/// Returns [`LoggingError::Filter`] when the directive is malformed.
pub fn resolve_filter(
    directive: Option<&str>,
    config: &LoggingConfig,
) -> Result<EnvFilter, LoggingError> {
    let directive = directive.map_or(config.level.as_str(), str::trim);
    EnvFilter::try_new(directive).map_err(|err| LoggingError::Filter {
        directive: directive.to_string(),
        message: err.to_string(),
    })
}

/// Installs the global subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`LoggingError`] when the filter is invalid or a subscriber exists.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let directive = std::env::var(LOG_ENV_VAR).ok();
    let filter = resolve_filter(directive.as_deref(), config)?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).json())
            .try_init(),
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).try_init()
        }
    };
    installed.map_err(|err| LoggingError::Install(err.to_string()))
}
