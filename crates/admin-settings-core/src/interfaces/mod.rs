// crates/admin-settings-core/src/interfaces/mod.rs
// ============================================================================
// Module: Admin Settings Interfaces
// Description: Collaborator contracts for loading, saving, and navigation.
// Purpose: Keep the engine independent of any transport or UI shell.
// Dependencies: crate::core, async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! The engine talks to the configuration server through [`ConfigSource`] and
//! [`ConfigSink`]. It never retries or times out on its own; transport policy
//! belongs to the implementations. A rejected save and a transport failure
//! both surface as [`SaveError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::ConfigDocument;

// ============================================================================
// SECTION: Config Source
// ============================================================================

/// Config source errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source could not produce a document.
    #[error("config source error: {0}")]
    Fetch(String),
    /// The source returned a document that is not usable.
    #[error("config source invalid data: {0}")]
    Invalid(String),
}

/// Loads the persisted configuration and its environment overrides.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetches the current configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the document cannot be loaded.
    async fn fetch_config(&self) -> Result<ConfigDocument, SourceError>;

    /// Fetches the document of values forced by deployment environment.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the overrides cannot be loaded.
    async fn fetch_environment_overrides(&self) -> Result<ConfigDocument, SourceError>;
}

// ============================================================================
// SECTION: Config Sink
// ============================================================================

/// Structured save failure shown next to the save control.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} ({code})")]
pub struct SaveError {
    /// Human-readable message, shown verbatim.
    pub message: String,
    /// Machine-readable error code.
    pub code: String,
}

impl SaveError {
    /// Creates a save error.
    #[must_use]
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Persists configuration documents.
#[async_trait]
pub trait ConfigSink: Send + Sync {
    /// Saves `document` and returns the server-confirmed document.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] when the server rejects the document or the
    /// transport fails.
    async fn save_config(&self, document: &ConfigDocument) -> Result<ConfigDocument, SaveError>;
}

// ============================================================================
// SECTION: Navigation Guard
// ============================================================================

/// Queried by the surrounding shell before navigating away from a page.
pub trait NavigationGuard {
    /// Returns true when leaving would discard unsaved edits.
    fn should_block_navigation(&self) -> bool;
}
