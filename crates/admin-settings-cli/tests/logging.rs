// crates/admin-settings-cli/tests/logging.rs
// ============================================================================
// Module: CLI Logging Tests
// Description: Exercises log filter resolution.
// Purpose: Ensure override directives win and malformed ones fail closed.
// Dependencies: admin-settings-cli logging module
// ============================================================================

//! ## Overview
//! Validates filter selection between the environment directive and the
//! configured level.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use admin_settings_cli::logging::LoggingError;
use admin_settings_cli::logging::resolve_filter;
use admin_settings_config::LogLevel;
use admin_settings_config::LoggingConfig;

fn config(level: LogLevel) -> LoggingConfig {
    LoggingConfig {
        level,
        ..LoggingConfig::default()
    }
}

#[test]
fn configured_level_is_used_without_override() {
    let filter = resolve_filter(None, &config(LogLevel::Debug)).unwrap();
    assert_eq!(filter.to_string(), "debug");
}

#[test]
fn override_directive_wins() {
    let filter =
        resolve_filter(Some(" admin_settings_core=trace "), &config(LogLevel::Error)).unwrap();
    assert_eq!(filter.to_string(), "admin_settings_core=trace");
}

#[test]
fn malformed_directive_is_rejected() {
    let err =
        resolve_filter(Some("admin_settings_core=loud"), &config(LogLevel::Warn)).unwrap_err();
    assert!(matches!(err, LoggingError::Filter { .. }));
}
