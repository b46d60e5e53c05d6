// crates/admin-settings-config/src/catalog.rs
// ============================================================================
// Module: Schema Catalog
// Description: Loads declarative page schemas from TOML or JSON files.
// Purpose: Reject malformed schemas at load time with precise errors.
// Dependencies: admin-settings-core, serde_json, toml, tracing
// ============================================================================

//! ## Overview
//! Each schema file holds exactly one page schema. The format is chosen by
//! file extension (`.toml` or `.json`). Every schema is validated as it is
//! loaded and schema ids must be unique across the catalog. Catalog order
//! follows the configured path order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use admin_settings_core::Schema;
use admin_settings_core::SchemaError;
use thiserror::Error;
use tracing::error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum schema file size in bytes.
pub const MAX_SCHEMA_FILE_SIZE: usize = 1024 * 1024;

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Supported schema file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl SchemaFormat {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// I/O failure while reading a schema file.
    #[error("schema io error: {path}: {message}")]
    Io {
        /// Schema file path.
        path: String,
        /// Underlying error text.
        message: String,
    },
    /// Extension is neither `.toml` nor `.json`.
    #[error("unsupported schema format: {0}")]
    UnsupportedFormat(String),
    /// File exceeds the size limit or is not utf-8.
    #[error("invalid schema file: {path}: {message}")]
    InvalidFile {
        /// Schema file path.
        path: String,
        /// Reason the file was rejected.
        message: String,
    },
    /// Schema text does not decode.
    #[error("schema parse error: {path}: {message}")]
    Parse {
        /// Schema source label.
        path: String,
        /// Decoder error text.
        message: String,
    },
    /// Schema decoded but is malformed.
    #[error("invalid schema {id}: {source}")]
    Schema {
        /// Schema id.
        id: String,
        /// Validation failure.
        #[source]
        source: SchemaError,
    },
    /// Two schemas share an id.
    #[error("duplicate schema id: {0}")]
    DuplicateId(String),
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Validated set of page schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    /// Schemas in load order.
    schemas: Vec<Schema>,
}

impl SchemaCatalog {
    /// Loads and validates every schema file in `paths`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on the first file that fails to load.
    pub fn load(paths: &[PathBuf]) -> Result<Self, CatalogError> {
        let schemas =
            paths.iter().map(|path| load_schema_file(path)).collect::<Result<Vec<_>, _>>()?;
        Self::from_validated(schemas)
    }

    /// Builds a catalog from decoded schemas.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when a schema is malformed or ids repeat.
    pub fn from_schemas(schemas: Vec<Schema>) -> Result<Self, CatalogError> {
        for schema in &schemas {
            validate_schema(schema)?;
        }
        Self::from_validated(schemas)
    }

    /// Builds a catalog from schemas that already passed validation.
    fn from_validated(schemas: Vec<Schema>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for schema in &schemas {
            if !seen.insert(schema.id.as_str()) {
                error!(schema = %schema.id, "duplicate schema id");
                return Err(CatalogError::DuplicateId(schema.id.clone()));
            }
        }
        Ok(Self {
            schemas,
        })
    }

    /// Looks up a schema by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Schema> {
        self.schemas.iter().find(|schema| schema.id == id)
    }

    /// Iterates schemas in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter()
    }

    /// Number of schemas.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when no schemas are loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes one schema from text without validating it.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] when the text does not decode.
pub fn parse_schema(
    content: &str,
    format: SchemaFormat,
    label: &str,
) -> Result<Schema, CatalogError> {
    let decoded = match format {
        SchemaFormat::Toml => toml::from_str::<Schema>(content).map_err(|err| err.to_string()),
        SchemaFormat::Json => {
            serde_json::from_str::<Schema>(content).map_err(|err| err.to_string())
        }
    };
    decoded.map_err(|message| {
        error!(path = label, %message, "schema failed to decode");
        CatalogError::Parse {
            path: label.to_string(),
            message,
        }
    })
}

/// Reads, decodes, and validates one schema file.
///
/// # Errors
///
/// Returns [`CatalogError`] when the file cannot be read, decoded, or validated.
pub fn load_schema_file(path: &Path) -> Result<Schema, CatalogError> {
    let label = path.display().to_string();
    let format = SchemaFormat::from_path(path)
        .ok_or_else(|| CatalogError::UnsupportedFormat(label.clone()))?;
    let bytes = fs::read(path).map_err(|err| CatalogError::Io {
        path: label.clone(),
        message: err.to_string(),
    })?;
    if bytes.len() > MAX_SCHEMA_FILE_SIZE {
        return Err(CatalogError::InvalidFile {
            path: label,
            message: "schema file exceeds size limit".to_string(),
        });
    }
    let content = std::str::from_utf8(&bytes).map_err(|_| CatalogError::InvalidFile {
        path: label.clone(),
        message: "schema file must be utf-8".to_string(),
    })?;
    let schema = parse_schema(content, format, &label)?;
    validate_schema(&schema)?;
    Ok(schema)
}

/// Validates a schema, logging the failure.
fn validate_schema(schema: &Schema) -> Result<(), CatalogError> {
    schema.validate().map_err(|source| {
        error!(schema = %schema.id, error = %source, "schema rejected");
        CatalogError::Schema {
            id: schema.id.clone(),
            source,
        }
    })
}
