// crates/admin-settings-core/src/runtime/projection.rs
// ============================================================================
// Module: Config Projection
// Description: Mapping between nested documents and flat form values.
// Purpose: Build form drafts from documents and merge drafts back for saving.
// Dependencies: crate::core, crate::runtime::resolver, serde_json, tracing
// ============================================================================

//! ## Overview
//! [`project_in`] is total: a missing or `null` document value falls back to
//! the field default. [`project_out`] starts from a copy of the confirmed
//! document and writes only what the draft changes:
//! - A disabled boolean writes `false`.
//! - A disabled non-boolean keeps the confirmed value; pending edits are dropped.
//! - An enabled field whose draft still equals its loaded value keeps the
//!   confirmed value untouched, so unedited documents round-trip exactly.
//! - Edited number fields are coerced through their numeric policy.
//! - Where the document lacks the key, an outgoing value equal to the default
//!   is not written, so absent keys stay absent.
//!
//! Field hooks on the page run inside both loops. A text field with a
//! dynamic value is always written with the computed value.
//!
//! Non-value controls are never projected in either direction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use tracing::debug;

use crate::core::ConfigDocument;
use crate::core::ControlType;
use crate::core::FieldDescriptor;
use crate::core::FormValues;
use crate::core::LicenseFlags;
use crate::core::SettingsPage;
use crate::core::coerce_integer;
use crate::runtime::resolver::is_disabled;

// ============================================================================
// SECTION: Project In
// ============================================================================

/// Projects `document` into flat form values for `page`.
#[must_use]
pub fn project_in(page: &SettingsPage, document: &ConfigDocument) -> FormValues {
    let schema = page.schema();
    let values = schema
        .value_fields()
        .map(|field| (field.key.clone(), loaded_value(page, field, document)))
        .collect();
    debug!(schema = %schema.id, "projected config document into form values");
    page.on_config_load(document, values)
}

/// Value `project_in` assigns to `field` before the page load hook.
fn loaded_value(page: &SettingsPage, field: &FieldDescriptor, document: &ConfigDocument) -> Value {
    let stored = document.get_present(&page.schema().config_path(field)).cloned();
    page.on_field_load(field, stored, document)
        .filter(|value| !value.is_null())
        .unwrap_or_else(|| field.default_value())
}

// ============================================================================
// SECTION: Project Out
// ============================================================================

/// Merges `values` into a copy of `document` for saving.
#[must_use]
pub fn project_out(
    page: &SettingsPage,
    values: &FormValues,
    document: &ConfigDocument,
    license: &LicenseFlags,
) -> ConfigDocument {
    let schema = page.schema();
    let mut outbound = document.clone();
    for field in schema.value_fields() {
        let path = schema.config_path(field);
        let previous = document.get_present(&path);
        let Some(value) = outgoing_value(page, field, values, document, license) else {
            continue;
        };
        let value = page.on_field_save(field, value, previous);
        if previous.is_none() && value == field.default_value() {
            continue;
        }
        outbound.set(&path, value);
    }
    debug!(schema = %schema.id, "projected form values into config document");
    page.on_config_save(outbound, document)
}

/// Value written for `field`, or `None` to keep the confirmed value.
fn outgoing_value(
    page: &SettingsPage,
    field: &FieldDescriptor,
    values: &FormValues,
    document: &ConfigDocument,
    license: &LicenseFlags,
) -> Option<Value> {
    if is_disabled(field, values, license) {
        return field.control.is_bool().then_some(Value::Bool(false));
    }
    if matches!(field.control, ControlType::Text { .. })
        && let Some(computed) = page.dynamic_value(field, values, document, license)
    {
        return Some(computed);
    }
    let current = values.get(&field.key).cloned().unwrap_or(Value::Null);
    if current == loaded_value(page, field, document) {
        return None;
    }
    match &field.control {
        ControlType::Number {
            policy,
            fallback,
        } => Some(Value::from(coerce_integer(&current, *policy, *fallback))),
        _ => Some(current),
    }
}
