// crates/admin-settings-cli/src/file_store.rs
// ============================================================================
// Module: File Config Store
// Description: Config source and sink backed by JSON files on disk.
// Purpose: Let the CLI load, edit, and persist configuration documents.
// Dependencies: admin-settings-core, async-trait, serde_json, tokio
// ============================================================================

//! ## Overview
//! [`FileConfigStore`] reads the persisted document and an optional
//! environment overrides document from JSON files. A missing document file
//! reads as an empty object so a first save can create it. Saves write a
//! sibling temporary file and rename it over the target, then echo the
//! written document back as confirmed; a failed rename removes the staged
//! file. Reads are size-limited and fail
//! closed on malformed JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use admin_settings_core::ConfigDocument;
use admin_settings_core::ConfigSink;
use admin_settings_core::ConfigSource;
use admin_settings_core::SaveError;
use admin_settings_core::SourceError;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a configuration document file.
pub const MAX_DOCUMENT_BYTES: usize = 8 * 1024 * 1024;

// ============================================================================
// SECTION: File Store
// ============================================================================

/// JSON file backed configuration store.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    /// Persisted document path.
    document_path: PathBuf,
    /// Environment overrides path.
    environment_path: Option<PathBuf>,
}

impl FileConfigStore {
    /// Creates a store over `document_path` and optional overrides.
    #[must_use]
    pub const fn new(document_path: PathBuf, environment_path: Option<PathBuf>) -> Self {
        Self {
            document_path,
            environment_path,
        }
    }

    /// Returns the persisted document path.
    #[must_use]
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }
}

#[async_trait]
impl ConfigSource for FileConfigStore {
    async fn fetch_config(&self) -> Result<ConfigDocument, SourceError> {
        read_document(&self.document_path).await
    }

    async fn fetch_environment_overrides(&self) -> Result<ConfigDocument, SourceError> {
        match &self.environment_path {
            Some(path) => read_document(path).await,
            None => Ok(ConfigDocument::empty()),
        }
    }
}

#[async_trait]
impl ConfigSink for FileConfigStore {
    async fn save_config(&self, document: &ConfigDocument) -> Result<ConfigDocument, SaveError> {
        let mut bytes = serde_json::to_vec_pretty(document.as_value())
            .map_err(|err| SaveError::new(err.to_string(), "encode_failed"))?;
        bytes.push(b'\n');
        let staging = staging_path(&self.document_path);
        tokio::fs::write(&staging, &bytes)
            .await
            .map_err(|err| SaveError::new(err.to_string(), "write_failed"))?;
        if let Err(err) = tokio::fs::rename(&staging, &self.document_path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&staging).await {
                warn!(
                    path = %staging.display(),
                    error = %cleanup,
                    "staged config file not removed"
                );
            }
            return Err(SaveError::new(err.to_string(), "write_failed"));
        }
        debug!(
            path = %self.document_path.display(),
            bytes = bytes.len(),
            "config document written"
        );
        Ok(document.clone())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a JSON document; a missing file is an empty document.
async fn read_document(path: &Path) -> Result<ConfigDocument, SourceError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ConfigDocument::empty()),
        Err(err) => return Err(SourceError::Fetch(format!("{}: {err}", path.display()))),
    };
    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(SourceError::Invalid(format!(
            "{}: document exceeds {MAX_DOCUMENT_BYTES} bytes",
            path.display()
        )));
    }
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|err| SourceError::Invalid(format!("{}: {err}", path.display())))?;
    if !value.is_object() {
        return Err(SourceError::Invalid(format!(
            "{}: document must be a JSON object",
            path.display()
        )));
    }
    Ok(ConfigDocument::new(value))
}

/// Sibling path used to stage a write before renaming.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
