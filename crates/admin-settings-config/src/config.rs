// crates/admin-settings-config/src/config.rs
// ============================================================================
// Module: Admin Settings Configuration
// Description: Configuration loading and validation for the settings engine.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: admin-settings-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from `admin-settings.toml` with strict size and
//! path limits. The file names the persisted document, optional environment
//! overrides, the schema files to load, license flags, and logging options.
//! Relative paths resolve against the directory holding the config file.
//! Missing or invalid configuration fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use admin_settings_core::LicenseFlags;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::catalog::SchemaCatalog;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "admin-settings.toml";
/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "ADMIN_SETTINGS_CONFIG";
/// Default persisted document filename.
pub const DEFAULT_DOCUMENT_PATH: &str = "config.json";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of schema files.
pub(crate) const MAX_SCHEMA_PATHS: usize = 256;
/// Maximum number of license flags.
pub(crate) const MAX_LICENSE_FLAGS: usize = 256;
/// Maximum license flag name length.
pub(crate) const MAX_LICENSE_FLAG_LENGTH: usize = 128;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Admin settings engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Persisted document location.
    #[serde(default)]
    pub document: DocumentConfig,
    /// Schema catalog sources.
    #[serde(default)]
    pub schemas: SchemasConfig,
    /// License flags consulted by field gates.
    #[serde(default)]
    pub license: LicenseConfig,
    /// Logging options.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Directory relative paths resolve against (not serialized).
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl ConsoleConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path comes from `path`, then [`CONFIG_ENV_VAR`], then
    /// [`DEFAULT_CONFIG_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml(content)?;
        config.base_dir = resolved.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.document.validate()?;
        self.schemas.validate()?;
        self.license.validate()?;
        Ok(())
    }

    /// Resolves a configured path against the config file directory.
    #[must_use]
    pub fn resolve(&self, value: &str) -> PathBuf {
        let path = Path::new(value.trim());
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Returns the resolved persisted document path.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.resolve(&self.document.path)
    }

    /// Returns the resolved environment overrides path, if configured.
    #[must_use]
    pub fn environment_overrides_path(&self) -> Option<PathBuf> {
        self.document.environment_overrides.as_deref().map(|value| self.resolve(value))
    }

    /// Returns the configured license flags.
    #[must_use]
    pub fn license_flags(&self) -> LicenseFlags {
        LicenseFlags::from(self.license.flags.clone())
    }

    /// Loads every configured schema file into a validated catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when a schema file cannot be loaded or is malformed.
    pub fn load_catalog(&self) -> Result<SchemaCatalog, CatalogError> {
        let paths: Vec<PathBuf> =
            self.schemas.paths.iter().map(|path| self.resolve(path)).collect();
        SchemaCatalog::load(&paths)
    }
}

/// Persisted document locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// JSON document holding the persisted configuration.
    #[serde(default = "default_document_path")]
    pub path: String,
    /// Optional JSON document of environment-forced values.
    #[serde(default)]
    pub environment_overrides: Option<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
            environment_overrides: None,
        }
    }
}

impl DocumentConfig {
    /// Validates document paths.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("document.path", &self.path)?;
        if let Some(overrides) = &self.environment_overrides {
            validate_path_string("document.environment_overrides", overrides)?;
        }
        Ok(())
    }
}

/// Serde default for the document path.
fn default_document_path() -> String {
    DEFAULT_DOCUMENT_PATH.to_string()
}

/// Schema catalog sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemasConfig {
    /// Schema files in TOML or JSON.
    #[serde(default)]
    pub paths: Vec<String>,
}

impl SchemasConfig {
    /// Validates schema paths.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.len() > MAX_SCHEMA_PATHS {
            return Err(ConfigError::Invalid("schemas.paths exceeds max entries".to_string()));
        }
        for path in &self.paths {
            validate_path_string("schemas.paths", path)?;
        }
        Ok(())
    }
}

/// License flag configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseConfig {
    /// Flag name to enabled state.
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}

impl LicenseConfig {
    /// Validates license flag names.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.flags.len() > MAX_LICENSE_FLAGS {
            return Err(ConfigError::Invalid("license.flags exceeds max entries".to_string()));
        }
        for name in self.flags.keys() {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "license.flags names must be non-empty".to_string(),
                ));
            }
            if name.len() > MAX_LICENSE_FLAG_LENGTH {
                return Err(ConfigError::Invalid(format!("license flag name too long: {name}")));
            }
        }
        Ok(())
    }
}

/// Logging options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level emitted.
    #[serde(default)]
    pub level: LogLevel,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    #[default]
    Warn,
    /// Informational events.
    Info,
    /// Debug events.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Returns the filter directive for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
pub(crate) fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
