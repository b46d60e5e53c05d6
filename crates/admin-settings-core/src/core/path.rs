// crates/admin-settings-core/src/core/path.rs
// ============================================================================
// Module: Config Paths
// Description: Dotted key paths into nested configuration documents.
// Purpose: Read and write nested JSON values by segment sequence.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`ConfigPath`] is the parsed form of a dotted key such as
//! `ClusterSettings.Enable`. Reads never fail: a missing segment or a
//! non-object intermediate yields `None`. Writes create missing intermediate
//! objects and replace `null` or scalar intermediates with empty objects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path string is empty.
    #[error("config path must not be empty")]
    Empty,
    /// Path contains an empty segment (leading, trailing, or doubled dot).
    #[error("config path has an empty segment: {0}")]
    EmptySegment(String),
}

// ============================================================================
// SECTION: Config Path
// ============================================================================

/// Parsed dotted path into a configuration document.
///
/// # Invariants
/// - Paths built with [`ConfigPath::parse`] have at least one non-empty segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigPath {
    /// Ordered object keys from the document root.
    segments: Vec<String>,
}

impl ConfigPath {
    /// Parses a dotted path, rejecting empty segments.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the path is empty or has an empty segment.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        if raw.split('.').any(str::is_empty) {
            return Err(PathError::EmptySegment(raw.to_string()));
        }
        Ok(Self::from_dotted(raw))
    }

    /// Splits a dotted path without validation.
    ///
    /// Empty segments are kept as empty object keys.
    #[must_use]
    pub fn from_dotted(raw: &str) -> Self {
        Self {
            segments: raw.split('.').map(str::to_string).collect(),
        }
    }

    /// Builds a path from explicit segments, keeping dots inside a segment.
    #[must_use]
    pub const fn from_segments(segments: Vec<String>) -> Self {
        Self {
            segments,
        }
    }

    /// Returns a path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self {
            segments,
        }
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Reads the value at this path, if every segment resolves.
    #[must_use]
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments.iter().try_fold(root, |current, segment| current.as_object()?.get(segment))
    }

    /// Writes `value` at this path, creating intermediate objects as needed.
    pub fn set(&self, root: &mut Value, value: Value) {
        if let Value::Object(map) = root {
            insert_at(map, &self.segments, value);
        } else {
            let mut fresh = Map::new();
            insert_at(&mut fresh, &self.segments, value);
            *root = Value::Object(fresh);
        }
    }
}

/// Inserts `value` under `segments`, replacing non-object intermediates.
fn insert_at(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let child = map.entry(head.clone()).or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child_map) = child {
                insert_at(child_map, rest, value);
            } else {
                let mut fresh = Map::new();
                insert_at(&mut fresh, rest, value);
                *child = Value::Object(fresh);
            }
        }
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for ConfigPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ConfigPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConfigPath> for String {
    fn from(value: ConfigPath) -> Self {
        value.to_string()
    }
}
