// crates/admin-settings-cli/tests/commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Runs the `admin-settings` binary against temporary files.
// Purpose: Ensure commands load, render, and persist documents end to end.
// Dependencies: admin-settings-cli binary, tempfile
// ============================================================================

//! ## Overview
//! Each test writes a config, a schema, and a document into a temporary
//! directory, then drives the binary and inspects stdout, stderr, and the
//! document left on disk.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const SCHEMA: &str = r#"
id = "S"

[[fields]]
key = "Enable"
control = { type = "bool" }
default = false

[[fields]]
key = "Name"
control = { type = "text" }
requires = [{ key = "Enable", equals = true }]
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(document: &Value) -> Self {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("s.toml"), SCHEMA).expect("write schema");
        fs::write(
            dir.path().join("admin-settings.toml"),
            "[document]\npath = \"config.json\"\n\n[schemas]\npaths = [\"s.toml\"]\n",
        )
        .expect("write config");
        fs::write(dir.path().join("config.json"), document.to_string()).expect("write document");
        Self {
            dir,
        }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("admin-settings.toml")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_admin-settings"))
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .env_remove("ADMIN_SETTINGS_LOG")
            .env_remove("ADMIN_SETTINGS_CONFIG")
            .output()
            .expect("run admin-settings")
    }

    fn document(&self) -> Value {
        let text = fs::read_to_string(self.dir.path().join("config.json")).expect("read document");
        serde_json::from_str(&text).expect("parse document")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn version_flag_prints_version() {
    let output =
        Command::new(env!("CARGO_BIN_EXE_admin-settings")).arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("admin-settings "));
}

#[test]
fn config_validate_reports_catalog_size() {
    let fixture = Fixture::new(&json!({}));
    let output = fixture.run(&["config", "validate"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("1 schema(s)"));
}

#[test]
fn missing_config_fails_closed() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_admin-settings"))
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["schema", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load config"));
}

#[test]
fn schema_list_prints_ids() {
    let fixture = Fixture::new(&json!({}));
    let output = fixture.run(&["schema", "list"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "S\t(unnamed)\t2 fields\n");
}

#[test]
fn schema_validate_rejects_dangling_dependency() {
    let fixture = Fixture::new(&json!({}));
    let bad = fixture.dir.path().join("bad.json");
    fs::write(
        &bad,
        r#"{"id": "B", "fields": [{"key": "A", "control": {"type": "text"},
            "requires": [{"key": "Ghost", "equals": 1}]}]}"#,
    )
    .unwrap();
    let output = fixture.run(&["schema", "validate", bad.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown field Ghost"));
}

#[test]
fn render_json_describes_controls() {
    let fixture = Fixture::new(&json!({"S": {"Enable": false, "Name": "a"}}));
    let output = fixture.run(&["render", "--schema", "S", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let page: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(page["schema_id"], "S");
    assert_eq!(page["controls"][0]["widget"], json!({"kind": "toggle", "value": false}));
    assert_eq!(page["controls"][1]["disabled"], true);
    assert_eq!(page["controls"][1]["widget"]["value"], "a");
}

#[test]
fn apply_saves_edits() {
    let fixture = Fixture::new(&json!({"S": {"Enable": true, "Name": "a"}, "Other": 1}));
    let output = fixture.run(&["apply", "--schema", "S", "--set", "Name=b"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("Saved S to "));
    assert_eq!(fixture.document(), json!({"S": {"Enable": true, "Name": "b"}, "Other": 1}));
}

#[test]
fn apply_keeps_confirmed_value_of_disabled_field() {
    let fixture = Fixture::new(&json!({"S": {"Enable": true, "Name": "x"}}));
    let output =
        fixture.run(&["apply", "--schema", "S", "--set", "Name=y", "--set", "Enable=false"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(fixture.document(), json!({"S": {"Enable": false, "Name": "x"}}));
}

#[test]
fn apply_dry_run_leaves_document_untouched() {
    let original = json!({"S": {"Enable": true, "Name": "a"}});
    let fixture = Fixture::new(&original);
    let output = fixture.run(&["apply", "--schema", "S", "--set", "Name=b", "--dry-run"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let preview: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(preview, json!({"S": {"Enable": true, "Name": "b"}}));
    assert_eq!(fixture.document(), original);
}

#[test]
fn apply_without_edits_reports_no_changes() {
    let fixture = Fixture::new(&json!({"S": {"Enable": true}}));
    let output = fixture.run(&["apply", "--schema", "S"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("No changes to save for S"));
}

#[test]
fn apply_unknown_field_fails() {
    let fixture = Fixture::new(&json!({}));
    let output = fixture.run(&["apply", "--schema", "S", "--set", "Ghost=1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Cannot edit Ghost: unknown field: Ghost"));
}

#[test]
fn unknown_schema_id_fails() {
    let fixture = Fixture::new(&json!({}));
    let output = fixture.run(&["render", "--schema", "Nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No schema with id Nope"));
}
