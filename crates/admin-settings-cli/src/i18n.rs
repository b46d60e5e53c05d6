// crates/admin-settings-cli/src/i18n.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Message catalog and placeholder substitution for the CLI.
// Purpose: Centralize user-facing strings behind stable keys.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! User-facing CLI strings live in one catalog keyed by stable identifiers.
//! All runtime output should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is built once and read-only thereafter.
//! - Missing keys fall back to the key itself.
//! - Placeholder substitutions apply in argument order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Catalog entries.
const CATALOG: &[(&str, &str)] = &[
    ("main.version", "admin-settings {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.encode_failed", "Failed to encode output: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config OK: document {document}, {schemas} schema(s)"),
    ("logging.init_failed", "Failed to initialize logging: {error}"),
    ("schema.load_failed", "Failed to load schemas: {error}"),
    ("schema.not_found", "No schema with id {id}"),
    ("schema.validate.ok", "Schema {id} OK ({fields} fields)"),
    ("schema.list.entry", "{id}\t{name}\t{fields} fields"),
    ("schema.list.empty", "No schemas configured."),
    ("schema.list.unnamed", "(unnamed)"),
    ("document.load_failed", "Failed to load config document: {error}"),
    ("render.header", "Page {id}: {name}"),
    ("render.control", "  {key}: {widget}"),
    ("render.flag.disabled", "[disabled]"),
    ("render.flag.set_by_env", "[set by environment]"),
    ("render.status.clean", "No unsaved changes."),
    ("render.status.dirty", "Unsaved changes."),
    ("render.error", "Last save failed: {error}"),
    ("render.on", "on"),
    ("render.off", "off"),
    ("render.widget.text", "text \"{value}\""),
    ("render.widget.number", "number {value}"),
    ("render.widget.toggle", "toggle {value}"),
    ("render.widget.choice", "choice {selected} of {options}"),
    ("render.widget.secret", "secret \"{value}\""),
    ("render.widget.username", "username \"{value}\""),
    ("render.widget.banner", "banner ({banner_type})"),
    ("render.widget.button", "button {action}"),
    ("render.widget.jobs", "jobs table {job_type}"),
    ("render.widget.custom", "custom {component} = {value}"),
    ("render.banner.info", "info"),
    ("render.banner.warning", "warning"),
    ("apply.assignment_invalid", "Expected KEY=VALUE, got {value}"),
    ("apply.edit_failed", "Cannot edit {key}: {error}"),
    ("apply.saved", "Saved {schema} to {path}"),
    ("apply.no_changes", "No changes to save for {schema}"),
    ("apply.save_failed", "Save failed: {error}"),
];

/// Returns the message catalog.
fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CATALOG_MAP.get_or_init(|| CATALOG.iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Looks up `key` and substitutes `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
