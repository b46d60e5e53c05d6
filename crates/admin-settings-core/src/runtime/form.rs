// crates/admin-settings-core/src/runtime/form.rs
// ============================================================================
// Module: Form Controller
// Description: Working draft, dirty tracking, and the save lifecycle.
// Purpose: Own one settings page visit from load through save or discard.
// Dependencies: crate::{core, interfaces, runtime}, base64, rand, thiserror, tracing
// ============================================================================

//! ## Overview
//! A [`FormController`] holds the draft values of one page together with the
//! last confirmed document. Edits mark the form dirty and are never
//! revalidated eagerly; gates are re-resolved on every read.
//!
//! Saving is split in two so a shell can drive it either way:
//! [`FormController::begin_submit`] hands out a [`PendingSave`] token and
//! [`FormController::complete_submit`] consumes it with the server result.
//! [`FormController::submit`] runs both around a [`ConfigSink`].
//!
//! Invariants:
//! - At most one save is outstanding; a second submit while saving is rejected.
//! - A successful save replaces the draft with the server-confirmed document.
//! - A failed save leaves the draft untouched and the form still dirty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::core::ConfigDocument;
use crate::core::ControlType;
use crate::core::FieldDescriptor;
use crate::core::FormValues;
use crate::core::LicenseFlags;
use crate::core::SchemaError;
use crate::core::SettingsPage;
use crate::interfaces::ConfigSink;
use crate::interfaces::ConfigSource;
use crate::interfaces::NavigationGuard;
use crate::interfaces::SaveError;
use crate::interfaces::SourceError;
use crate::runtime::projection::project_in;
use crate::runtime::projection::project_out;
use crate::runtime::resolver::FieldStatus;
use crate::runtime::resolver::effective_value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Random bytes drawn for a regenerated secret.
pub const GENERATED_SECRET_BYTES: usize = 32;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when editing a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// No field with this key exists in the schema.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// The field value is forced by deployment environment.
    #[error("field is set by environment: {0}")]
    SetByEnvironment(String),
    /// The field's control holds no value.
    #[error("field holds no value: {0}")]
    NotEditable(String),
    /// The field is not a generated secret.
    #[error("field is not a generated secret: {0}")]
    NotSecret(String),
    /// A save is outstanding.
    #[error("cannot edit field {0} while a save is in flight")]
    SaveInFlight(String),
}

/// Reasons a submit is refused before reaching the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    /// Nothing changed since the last load or save.
    #[error("form has no unsaved changes")]
    NotDirty,
    /// A save is already outstanding.
    #[error("a save is already in flight")]
    SaveInFlight,
    /// The page save gate returned false.
    #[error("page does not allow saving the current values")]
    Blocked,
}

/// Errors returned by [`FormController::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Submit was refused locally.
    #[error(transparent)]
    Rejected(#[from] SubmitRejected),
    /// The sink rejected the document or failed.
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Errors raised while loading a form from a source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The page schema is malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

// ============================================================================
// SECTION: Pending Save
// ============================================================================

/// Outbound document of an in-flight save.
///
/// Returned by [`FormController::begin_submit`] and consumed by
/// [`FormController::complete_submit`] or [`FormController::cancel_submit`].
#[derive(Debug)]
#[must_use = "a pending save must be completed or cancelled"]
pub struct PendingSave {
    /// Document to send to the sink.
    document: ConfigDocument,
}

impl PendingSave {
    /// Returns the outbound document.
    #[must_use]
    pub const fn document(&self) -> &ConfigDocument {
        &self.document
    }
}

// ============================================================================
// SECTION: Form Controller
// ============================================================================

/// Draft state and save lifecycle for one settings page.
#[derive(Debug, Clone)]
pub struct FormController {
    /// Page schema and hooks.
    page: SettingsPage,
    /// License flags consulted by gates.
    license: LicenseFlags,
    /// Environment override document.
    environment: ConfigDocument,
    /// Last confirmed document.
    baseline: ConfigDocument,
    /// Current draft values.
    values: FormValues,
    /// Draft differs from the baseline projection.
    dirty: bool,
    /// A save is outstanding.
    saving: bool,
    /// Error of the last failed save.
    error: Option<SaveError>,
}

impl FormController {
    /// Validates the page schema and projects `document` into a clean draft.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the page schema is malformed.
    pub fn new(
        page: SettingsPage,
        document: ConfigDocument,
        license: LicenseFlags,
        environment: ConfigDocument,
    ) -> Result<Self, SchemaError> {
        if let Err(err) = page.schema().validate() {
            error!(schema = %page.schema().id, error = %err, "settings schema is malformed");
            return Err(err);
        }
        let values = project_in(&page, &document);
        Ok(Self {
            page,
            license,
            environment,
            baseline: document,
            values,
            dirty: false,
            saving: false,
            error: None,
        })
    }

    /// Fetches the document and environment overrides from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the source fails or the schema is malformed.
    pub async fn load<S>(
        page: SettingsPage,
        source: &S,
        license: LicenseFlags,
    ) -> Result<Self, LoadError>
    where
        S: ConfigSource + ?Sized,
    {
        let document = source.fetch_config().await?;
        let environment = source.fetch_environment_overrides().await?;
        Ok(Self::new(page, document, license, environment)?)
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Updates one field and marks the form dirty.
    ///
    /// Generated secrets are normalized to the URL-safe alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when the key is unknown, the field is forced by
    /// environment, the control holds no value, or a save is in flight.
    pub fn set_field(&mut self, key: &str, value: Value) -> Result<(), FormError> {
        let field = self.editable_field(key)?;
        let value = match (&field.control, value) {
            (ControlType::GeneratedSecret, Value::String(secret)) => {
                Value::String(normalize_secret(&secret))
            }
            (_, value) => value,
        };
        self.values.insert(key, value);
        self.dirty = true;
        debug!(schema = %self.page.schema().id, field = %key, "form field updated");
        Ok(())
    }

    /// Replaces a generated secret with fresh random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when the field cannot be edited or is not a secret.
    pub fn regenerate_secret(&mut self, key: &str) -> Result<String, FormError> {
        let field = self.editable_field(key)?;
        if !matches!(field.control, ControlType::GeneratedSecret) {
            return Err(FormError::NotSecret(key.to_string()));
        }
        let mut bytes = [0_u8; GENERATED_SECRET_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let secret = URL_SAFE_NO_PAD.encode(bytes);
        self.set_field(key, Value::String(secret.clone()))?;
        Ok(secret)
    }

    /// Resolves `key` to a field that accepts edits.
    fn editable_field(&self, key: &str) -> Result<&FieldDescriptor, FormError> {
        let schema = self.page.schema();
        let Some(field) = schema.field(key) else {
            error!(schema = %schema.id, field = %key, "edit references unknown field");
            return Err(FormError::UnknownField(key.to_string()));
        };
        if self.saving {
            return Err(FormError::SaveInFlight(key.to_string()));
        }
        if !field.control.is_value_bearing() {
            return Err(FormError::NotEditable(key.to_string()));
        }
        if self.status(field).set_by_env {
            return Err(FormError::SetByEnvironment(key.to_string()));
        }
        Ok(field)
    }

    /// Restores the draft from the last confirmed document.
    pub fn discard(&mut self) {
        self.values = project_in(&self.page, &self.baseline);
        self.dirty = false;
        self.error = None;
        debug!(schema = %self.page.schema().id, "form edits discarded");
    }

    // ------------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------------

    /// Starts a save and returns the outbound document.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitRejected`] when nothing changed, a save is in flight,
    /// or the page save gate refuses the current values.
    pub fn begin_submit(&mut self) -> Result<PendingSave, SubmitRejected> {
        let rejection = if self.saving {
            Some(SubmitRejected::SaveInFlight)
        } else if !self.dirty {
            Some(SubmitRejected::NotDirty)
        } else if !self.page.can_save(&self.values) {
            Some(SubmitRejected::Blocked)
        } else {
            None
        };
        if let Some(rejection) = rejection {
            warn!(schema = %self.page.schema().id, reason = %rejection, "submit rejected");
            return Err(rejection);
        }

        self.saving = true;
        self.error = None;
        let document = project_out(&self.page, &self.values, &self.baseline, &self.license);
        Ok(PendingSave {
            document,
        })
    }

    /// Applies the sink result of a save started by [`Self::begin_submit`].
    ///
    /// # Errors
    ///
    /// Returns the [`SaveError`] after storing it on the form.
    pub fn complete_submit(
        &mut self,
        pending: PendingSave,
        result: Result<ConfigDocument, SaveError>,
    ) -> Result<(), SaveError> {
        drop(pending);
        self.saving = false;
        match result {
            Ok(confirmed) => {
                self.values = project_in(&self.page, &confirmed);
                self.baseline = confirmed;
                self.dirty = false;
                self.error = None;
                info!(schema = %self.page.schema().id, "settings saved");
                Ok(())
            }
            Err(err) => {
                info!(schema = %self.page.schema().id, code = %err.code, "settings save failed");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Abandons a save without a sink result; the draft stays dirty.
    pub fn cancel_submit(&mut self, pending: PendingSave) {
        drop(pending);
        self.saving = false;
    }

    /// Saves the draft through `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the submit is rejected or the save fails.
    pub async fn submit<S>(&mut self, sink: &S) -> Result<(), SubmitError>
    where
        S: ConfigSink + ?Sized,
    {
        let pending = self.begin_submit()?;
        let result = sink.save_config(pending.document()).await;
        self.complete_submit(pending, result)?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the page.
    #[must_use]
    pub const fn page(&self) -> &SettingsPage {
        &self.page
    }

    /// Returns the draft values.
    #[must_use]
    pub const fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns the effective value of `key`, with disabled booleans forced off.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<Value> {
        let field = self.page.schema().field(key)?;
        Some(effective_value(field, &self.values, &self.license))
    }

    /// Returns the last confirmed document.
    #[must_use]
    pub const fn document(&self) -> &ConfigDocument {
        &self.baseline
    }

    /// Returns the environment override document.
    #[must_use]
    pub const fn environment(&self) -> &ConfigDocument {
        &self.environment
    }

    /// Returns the license flags.
    #[must_use]
    pub const fn license(&self) -> &LicenseFlags {
        &self.license
    }

    /// Returns true when the draft has unsaved edits.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns true while a save is outstanding.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    /// Returns the error of the last failed save.
    #[must_use]
    pub const fn error(&self) -> Option<&SaveError> {
        self.error.as_ref()
    }

    /// Returns true when the page save gate accepts the current values.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.page.can_save(&self.values)
    }

    /// Resolves the current status of `field`.
    #[must_use]
    pub fn status(&self, field: &FieldDescriptor) -> FieldStatus {
        FieldStatus::resolve(
            field,
            &self.page.schema().id,
            &self.values,
            &self.license,
            &self.environment,
        )
    }

    /// Returns the document a save would send now, without starting one.
    #[must_use]
    pub fn preview(&self) -> ConfigDocument {
        project_out(&self.page, &self.values, &self.baseline, &self.license)
    }
}

impl NavigationGuard for FormController {
    fn should_block_navigation(&self) -> bool {
        self.dirty
    }
}

/// Maps the standard base64 alphabet onto the URL-safe one.
#[must_use]
pub fn normalize_secret(secret: &str) -> String {
    secret.replace('+', "-").replace('/', "_")
}
