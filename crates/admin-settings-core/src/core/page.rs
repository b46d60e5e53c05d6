// crates/admin-settings-core/src/core/page.rs
// ============================================================================
// Module: Settings Pages
// Description: Schema plus page and field load/save hooks.
// Purpose: Let individual pages adjust projection without forking the engine.
// Dependencies: crate::core::{document, license, schema, values}, serde_json
// ============================================================================

//! ## Overview
//! Most pages are pure data. A few need to massage values after load, patch
//! the outbound document before save, or block saving until some page-level
//! condition holds. Those pages attach a [`SchemaHooks`] implementation.
//!
//! Field hooks run inside the per-field projection loop: `on_field_load` sees
//! the raw stored value before the default applies, `on_field_save` sees each
//! value about to be written. Text fields may also compute their outgoing
//! value through `dynamic_value`.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::core::document::ConfigDocument;
use crate::core::license::LicenseFlags;
use crate::core::schema::FieldDescriptor;
use crate::core::schema::Schema;
use crate::core::values::FormValues;

// ============================================================================
// SECTION: Hooks
// ============================================================================

/// Page-specific projection hooks. Every method defaults to a pass-through.
pub trait SchemaHooks: Send + Sync {
    /// Adjusts values projected from `document`.
    fn on_config_load(&self, _document: &ConfigDocument, values: FormValues) -> FormValues {
        values
    }

    /// Adjusts the outbound document; `original` is the last confirmed document.
    fn on_config_save(
        &self,
        outbound: ConfigDocument,
        _original: &ConfigDocument,
    ) -> ConfigDocument {
        outbound
    }

    /// Returns false to block submission of the current values.
    fn can_save(&self, _values: &FormValues) -> bool {
        true
    }

    /// Adjusts the stored value of `field`; `None` falls back to the default.
    fn on_field_load(
        &self,
        _field: &FieldDescriptor,
        value: Option<Value>,
        _document: &ConfigDocument,
    ) -> Option<Value> {
        value
    }

    /// Adjusts a value about to be written; `previous` is the confirmed value.
    fn on_field_save(
        &self,
        _field: &FieldDescriptor,
        value: Value,
        _previous: Option<&Value>,
    ) -> Value {
        value
    }

    /// Computes the outgoing value of an enabled text field from the draft.
    fn dynamic_value(
        &self,
        _field: &FieldDescriptor,
        _values: &FormValues,
        _document: &ConfigDocument,
        _license: &LicenseFlags,
    ) -> Option<Value> {
        None
    }
}

// ============================================================================
// SECTION: Settings Page
// ============================================================================

/// A schema bound to optional hooks.
#[derive(Clone)]
pub struct SettingsPage {
    /// Page schema.
    schema: Schema,
    /// Optional page hooks.
    hooks: Option<Arc<dyn SchemaHooks>>,
}

impl SettingsPage {
    /// Creates a page without hooks.
    #[must_use]
    pub const fn new(schema: Schema) -> Self {
        Self {
            schema,
            hooks: None,
        }
    }

    /// Attaches hooks to the page.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn SchemaHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Returns the page schema.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Runs the load hook.
    #[must_use]
    pub fn on_config_load(&self, document: &ConfigDocument, values: FormValues) -> FormValues {
        match &self.hooks {
            Some(hooks) => hooks.on_config_load(document, values),
            None => values,
        }
    }

    /// Runs the save hook.
    #[must_use]
    pub fn on_config_save(
        &self,
        outbound: ConfigDocument,
        original: &ConfigDocument,
    ) -> ConfigDocument {
        match &self.hooks {
            Some(hooks) => hooks.on_config_save(outbound, original),
            None => outbound,
        }
    }

    /// Runs the field load hook.
    #[must_use]
    pub fn on_field_load(
        &self,
        field: &FieldDescriptor,
        value: Option<Value>,
        document: &ConfigDocument,
    ) -> Option<Value> {
        match &self.hooks {
            Some(hooks) => hooks.on_field_load(field, value, document),
            None => value,
        }
    }

    /// Runs the field save hook.
    #[must_use]
    pub fn on_field_save(
        &self,
        field: &FieldDescriptor,
        value: Value,
        previous: Option<&Value>,
    ) -> Value {
        match &self.hooks {
            Some(hooks) => hooks.on_field_save(field, value, previous),
            None => value,
        }
    }

    /// Returns the computed value of `field`, when the page supplies one.
    #[must_use]
    pub fn dynamic_value(
        &self,
        field: &FieldDescriptor,
        values: &FormValues,
        document: &ConfigDocument,
        license: &LicenseFlags,
    ) -> Option<Value> {
        self.hooks.as_ref().and_then(|hooks| hooks.dynamic_value(field, values, document, license))
    }

    /// Runs the save gate.
    #[must_use]
    pub fn can_save(&self, values: &FormValues) -> bool {
        self.hooks.as_ref().is_none_or(|hooks| hooks.can_save(values))
    }
}

impl fmt::Debug for SettingsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsPage")
            .field("schema", &self.schema)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

impl From<Schema> for SettingsPage {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}
