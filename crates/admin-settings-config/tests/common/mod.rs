// crates/admin-settings-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Helpers
// Description: Shared fixtures for config and catalog tests.
// Purpose: Write throwaway config trees and check error messages.
// ============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Result type for fallible tests.
pub type TestResult = Result<(), String>;

/// Passes when `result` is an error whose message contains `needle`.
pub fn assert_invalid<T, E: std::fmt::Display>(result: Result<T, E>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err(format!("expected error containing {needle}")),
    }
}

/// Temporary directory holding test files.
pub struct Workspace {
    /// Backing directory, removed on drop.
    dir: TempDir,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            dir: TempDir::new().map_err(|err| err.to_string())?,
        })
    }

    /// Writes `content` to `name` and returns the full path.
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf, String> {
        let path = self.dir.path().join(name);
        fs::write(&path, content).map_err(|err| err.to_string())?;
        Ok(path)
    }

    /// Full path of `name` inside the workspace.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// A valid TOML schema for the `general` page.
pub const GENERAL_SCHEMA_TOML: &str = r#"
id = "general"
name = "admin.general.title"

[[fields]]
key = "SiteName"
label = "admin.general.site_name"
default = "My Site"
control = { type = "text", max_length = 30 }

[[fields]]
key = "EnableSignup"
control = { type = "bool" }
default = true

[[fields]]
key = "SignupMessage"
control = { type = "text", multiline = true }
requires = [{ key = "EnableSignup", equals = true }]
"#;

/// A valid JSON schema for the `files` page.
pub const FILES_SCHEMA_JSON: &str = r#"{
  "id": "files",
  "fields": [
    {"key": "Driver", "control": {"type": "radio", "options": [{"value": "local"}, {"value": "s3"}]}},
    {"key": "Bucket", "control": {"type": "text"},
     "requires": [{"key": "Driver", "equals": "s3"}]}
  ]
}"#;
