// crates/admin-settings-core/src/core/document.rs
// ============================================================================
// Module: Config Documents
// Description: Persisted configuration document wrapper.
// Purpose: Provide path-based access to an opaque nested JSON document.
// Dependencies: crate::core::path, serde, serde_json
// ============================================================================

//! ## Overview
//! The configuration document is owned by the save collaborator. The engine
//! treats it as an opaque nested key-value tree and only touches the paths its
//! schemas name. Copies are plain value clones.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::path::ConfigPath;

// ============================================================================
// SECTION: Config Document
// ============================================================================

/// Nested configuration document exchanged with the config server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument(Value);

impl ConfigDocument {
    /// Wraps an existing JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Creates an empty object document.
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Returns the underlying JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the document and returns the JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Reads the value stored at `path`.
    #[must_use]
    pub fn get(&self, path: &ConfigPath) -> Option<&Value> {
        path.get(&self.0)
    }

    /// Reads the value at `path`, treating `null` as absent.
    #[must_use]
    pub fn get_present(&self, path: &ConfigPath) -> Option<&Value> {
        self.get(path).filter(|value| !value.is_null())
    }

    /// Returns true when `path` resolves to any value, including `null`.
    #[must_use]
    pub fn contains(&self, path: &ConfigPath) -> bool {
        self.get(path).is_some()
    }

    /// Writes `value` at `path`, creating intermediate objects.
    pub fn set(&mut self, path: &ConfigPath, value: Value) {
        path.set(&mut self.0, value);
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for ConfigDocument {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
