// crates/admin-settings-config/src/lib.rs
// ============================================================================
// Module: Admin Settings Config Library
// Description: Engine configuration and schema catalog loading.
// Purpose: Expose the config model, validation, and schema file loaders.
// Dependencies: crate::{catalog, config}
// ============================================================================

//! ## Overview
//! This crate owns the on-disk inputs of the settings engine: the
//! `admin-settings.toml` configuration and the declarative schema files it
//! lists. Both are validated on load and fail closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::CatalogError;
pub use catalog::SchemaCatalog;
pub use catalog::SchemaFormat;
pub use catalog::load_schema_file;
pub use catalog::parse_schema;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::ConsoleConfig;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::DocumentConfig;
pub use config::LicenseConfig;
pub use config::LogFormat;
pub use config::LogLevel;
pub use config::LoggingConfig;
pub use config::SchemasConfig;
