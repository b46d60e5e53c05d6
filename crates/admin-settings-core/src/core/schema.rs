// crates/admin-settings-core/src/core/schema.rs
// ============================================================================
// Module: Settings Schemas
// Description: Declarative field descriptors and settings page schemas.
// Purpose: Describe configurable fields, their controls, and gating rules.
// Dependencies: crate::core::{numeric, path}, regex, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Schema`] is an ordered list of [`FieldDescriptor`] values for one
//! settings page. Each descriptor names the control it renders as through the
//! [`ControlType`] variant, which only carries attributes meaningful for that
//! control. Unknown control tags fail deserialization with the offending tag
//! named in the error.
//!
//! Schemas are constructed once from static declarative data and are immutable
//! for the lifetime of a page visit. [`Schema::validate`] catches authoring
//! bugs (duplicate keys, gates referencing unknown fields) before a form is
//! built.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::numeric::NumericPolicy;
use crate::core::path::ConfigPath;

// ============================================================================
// SECTION: Value Matching
// ============================================================================

/// Compiled regular expression used by pattern gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValuePattern {
    /// Compiled expression.
    regex: Regex,
}

impl ValuePattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] when the expression is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Tests the text form of a scalar value.
    #[must_use]
    pub fn is_match(&self, value: &Value) -> bool {
        scalar_text(value).is_some_and(|text| self.regex.is_match(&text))
    }
}

impl PartialEq for ValuePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for ValuePattern {
    type Error = regex::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ValuePattern> for String {
    fn from(value: ValuePattern) -> Self {
        value.as_str().to_string()
    }
}

/// Text form of strings, numbers, and booleans; `None` for other values.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Strict equality; numbers compare by numeric value.
fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            a == b
                || matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x.total_cmp(&y).is_eq())
        }
        _ => left == right,
    }
}

/// Expected value of a gate condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMatcher {
    /// Strict equality against a JSON value.
    Equals(Value),
    /// Regular expression tested against the value's text form.
    Matches(ValuePattern),
}

impl ValueMatcher {
    /// Tests an actual form value. A missing value compares as `null`.
    #[must_use]
    pub fn matches(&self, actual: Option<&Value>) -> bool {
        let actual = actual.unwrap_or(&Value::Null);
        match self {
            Self::Equals(expected) => strict_equals(actual, expected),
            Self::Matches(pattern) => pattern.is_match(actual),
        }
    }
}

/// One `(otherKey, expected)` gate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Key of the field whose current form value is inspected.
    pub key: String,
    /// Expected value or pattern.
    #[serde(flatten)]
    pub expected: ValueMatcher,
}

impl Condition {
    /// Condition requiring strict equality.
    #[must_use]
    pub fn equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            expected: ValueMatcher::Equals(value.into()),
        }
    }

    /// Condition requiring a pattern match.
    #[must_use]
    pub fn matches(key: impl Into<String>, pattern: ValuePattern) -> Self {
        Self {
            key: key.into(),
            expected: ValueMatcher::Matches(pattern),
        }
    }
}

// ============================================================================
// SECTION: Control Types
// ============================================================================

/// Selectable option for dropdown and radio controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Stored value.
    pub value: String,
    /// Display label reference.
    #[serde(default)]
    pub label: Option<String>,
}

/// Banner severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerType {
    /// Informational banner.
    #[default]
    Info,
    /// Warning banner.
    Warning,
}

/// Control rendered for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlType {
    /// Free text input.
    Text {
        /// Placeholder message reference.
        #[serde(default)]
        placeholder: Option<String>,
        /// Maximum input length.
        #[serde(default)]
        max_length: Option<usize>,
        /// Multi-line text area.
        #[serde(default)]
        multiline: bool,
    },
    /// Integer input coerced through a numeric policy.
    Number {
        /// Floor applied to parsed values.
        #[serde(default)]
        policy: NumericPolicy,
        /// Substitute for unparsable input.
        #[serde(default)]
        fallback: Option<i64>,
    },
    /// Boolean toggle.
    Bool,
    /// Single-select dropdown.
    Dropdown {
        /// Selectable options in display order.
        options: Vec<ChoiceOption>,
    },
    /// Radio group.
    Radio {
        /// Selectable options in display order.
        options: Vec<ChoiceOption>,
    },
    /// Random secret with a regenerate action.
    GeneratedSecret,
    /// User search input storing a username.
    UsernameLookup {
        /// Placeholder message reference.
        #[serde(default)]
        placeholder: Option<String>,
    },
    /// Static banner; holds no value.
    Banner {
        /// Banner severity.
        #[serde(default)]
        banner_type: BannerType,
    },
    /// Action button; holds no value.
    Button {
        /// Action identifier invoked on the config server.
        action: String,
        /// Message reference shown on success.
        #[serde(default)]
        success_message: Option<String>,
        /// Message reference shown on failure.
        #[serde(default)]
        error_message: Option<String>,
    },
    /// Background jobs table; holds no value.
    JobsTable {
        /// Job type listed by the table.
        job_type: String,
    },
    /// Custom component bound to the field value.
    Custom {
        /// Component identifier.
        component: String,
    },
}

impl ControlType {
    /// Returns true when the control stores a value in the document.
    #[must_use]
    pub const fn is_value_bearing(&self) -> bool {
        !matches!(self, Self::Banner { .. } | Self::Button { .. } | Self::JobsTable { .. })
    }

    /// Returns true for boolean toggles.
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Returns the declarative tag of the control.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Number { .. } => "number",
            Self::Bool => "bool",
            Self::Dropdown { .. } => "dropdown",
            Self::Radio { .. } => "radio",
            Self::GeneratedSecret => "generated_secret",
            Self::UsernameLookup { .. } => "username_lookup",
            Self::Banner { .. } => "banner",
            Self::Button { .. } => "button",
            Self::JobsTable { .. } => "jobs_table",
            Self::Custom { .. } => "custom",
        }
    }
}

// ============================================================================
// SECTION: Field Descriptors
// ============================================================================

/// One configurable setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDescriptor {
    /// Field key; a dotted key is an absolute document path.
    pub key: String,
    /// Control rendered for the field.
    pub control: ControlType,
    /// Value used when the document lacks the key.
    #[serde(default)]
    pub default: Option<Value>,
    /// Conditions that must all match for the field to be enabled.
    #[serde(default)]
    pub requires: Vec<Condition>,
    /// Conditions of which at least one must match when non-empty.
    #[serde(default)]
    pub requires_any: Vec<Condition>,
    /// License flag that must be enabled.
    #[serde(default)]
    pub requires_license_flag: Option<String>,
    /// License flag that must be disabled.
    #[serde(default)]
    pub requires_no_license_flag: Option<String>,
    /// Conditions that must all match for the field to be shown.
    #[serde(default)]
    pub hidden_unless: Vec<Condition>,
    /// Label message reference.
    #[serde(default)]
    pub label: Option<String>,
    /// Help text message reference.
    #[serde(default)]
    pub help_text: Option<String>,
    /// Help text shown instead while the field is disabled.
    #[serde(default)]
    pub disabled_help_text: Option<String>,
}

impl FieldDescriptor {
    /// Creates a descriptor with no default, gates, or messages.
    #[must_use]
    pub fn new(key: impl Into<String>, control: ControlType) -> Self {
        Self {
            key: key.into(),
            control,
            default: None,
            requires: Vec::new(),
            requires_any: Vec::new(),
            requires_license_flag: None,
            requires_no_license_flag: None,
            hidden_unless: Vec::new(),
            label: None,
            help_text: None,
            disabled_help_text: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Adds an AND condition.
    #[must_use]
    pub fn requiring(mut self, condition: Condition) -> Self {
        self.requires.push(condition);
        self
    }

    /// Adds an OR condition.
    #[must_use]
    pub fn requiring_any(mut self, condition: Condition) -> Self {
        self.requires_any.push(condition);
        self
    }

    /// Returns the default, or `null` when none is declared.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }

    /// Resolves the document path for this field within `schema_id`.
    ///
    /// Keys without a dot nest under the schema id.
    #[must_use]
    pub fn config_path(&self, schema_id: &str) -> ConfigPath {
        if self.key.contains('.') {
            ConfigPath::from_dotted(&self.key)
        } else {
            ConfigPath::from_segments(vec![schema_id.to_string(), self.key.clone()])
        }
    }

    /// Iterates every condition the field declares.
    fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.requires.iter().chain(&self.requires_any).chain(&self.hidden_unless)
    }
}

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Ordered field list for one settings page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    /// Namespace; keys without a dot nest under it in the document.
    pub id: String,
    /// Display name reference.
    #[serde(default)]
    pub name: Option<String>,
    /// Header markup reference.
    #[serde(default)]
    pub header: Option<String>,
    /// Footer markup reference.
    #[serde(default)]
    pub footer: Option<String>,
    /// Fields in render order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Creates a schema with the given fields.
    #[must_use]
    pub fn new(id: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            id: id.into(),
            name: None,
            header: None,
            footer: None,
            fields,
        }
    }

    /// Looks up a field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Iterates fields that store a value.
    pub fn value_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|field| field.control.is_value_bearing())
    }

    /// Resolves the document path of `field`.
    #[must_use]
    pub fn config_path(&self, field: &FieldDescriptor) -> ConfigPath {
        field.config_path(&self.id)
    }

    /// Validates schema authoring invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the schema is malformed.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.id.trim().is_empty() {
            return Err(SchemaError::EmptyId);
        }

        ensure_keys_well_formed(&self.fields)?;
        ensure_unique_keys(&self.fields)?;
        self.ensure_unique_paths()?;
        ensure_dependencies_resolve(&self.fields)?;
        ensure_controls_well_formed(&self.fields)?;

        Ok(())
    }

    /// Rejects two value fields writing the same document path.
    fn ensure_unique_paths(&self) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for field in self.value_fields() {
            let path = self.config_path(field);
            if !seen.insert(path.to_string()) {
                return Err(SchemaError::DuplicatePath(path.to_string()));
            }
        }
        Ok(())
    }
}

/// Schema validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Schema id is empty.
    #[error("schema id must not be empty")]
    EmptyId,
    /// A field key is empty.
    #[error("field key must not be empty (control {0})")]
    EmptyKey(String),
    /// A field key has an empty path segment.
    #[error("field key has an empty segment: {0}")]
    InvalidKey(String),
    /// Two fields share a key.
    #[error("duplicate field key: {0}")]
    DuplicateKey(String),
    /// Two value fields resolve to the same document path.
    #[error("duplicate config path: {0}")]
    DuplicatePath(String),
    /// A gate references a key that is not a value field of the schema.
    #[error("field {field} references unknown field {dependency}")]
    UnknownDependency {
        /// Field declaring the gate.
        field: String,
        /// Referenced key.
        dependency: String,
    },
    /// Dropdown or radio declares no options.
    #[error("field {0} must declare at least one option")]
    MissingOptions(String),
    /// Non-zero policy minimum below 1.
    #[error("field {field} has invalid non-zero minimum {minimum}")]
    InvalidMinimum {
        /// Field declaring the policy.
        field: String,
        /// Declared minimum.
        minimum: i64,
    },
}

/// Rejects empty keys and keys with empty segments.
fn ensure_keys_well_formed(fields: &[FieldDescriptor]) -> Result<(), SchemaError> {
    for field in fields {
        if field.key.is_empty() {
            return Err(SchemaError::EmptyKey(field.control.tag().to_string()));
        }
        if ConfigPath::parse(&field.key).is_err() {
            return Err(SchemaError::InvalidKey(field.key.clone()));
        }
    }
    Ok(())
}

/// Rejects duplicate field keys.
fn ensure_unique_keys(fields: &[FieldDescriptor]) -> Result<(), SchemaError> {
    let mut seen = BTreeSet::new();
    for field in fields {
        if !seen.insert(field.key.as_str()) {
            return Err(SchemaError::DuplicateKey(field.key.clone()));
        }
    }
    Ok(())
}

/// Rejects gates referencing keys that are not value fields.
fn ensure_dependencies_resolve(fields: &[FieldDescriptor]) -> Result<(), SchemaError> {
    let value_keys: BTreeSet<&str> = fields
        .iter()
        .filter(|field| field.control.is_value_bearing())
        .map(|field| field.key.as_str())
        .collect();
    for field in fields {
        for condition in field.conditions() {
            if !value_keys.contains(condition.key.as_str()) {
                return Err(SchemaError::UnknownDependency {
                    field: field.key.clone(),
                    dependency: condition.key.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Rejects control attributes that cannot render.
fn ensure_controls_well_formed(fields: &[FieldDescriptor]) -> Result<(), SchemaError> {
    for field in fields {
        match &field.control {
            ControlType::Dropdown {
                options,
            }
            | ControlType::Radio {
                options,
            } if options.is_empty() => {
                return Err(SchemaError::MissingOptions(field.key.clone()));
            }
            ControlType::Number {
                policy:
                    NumericPolicy::NonZero {
                        minimum,
                    },
                ..
            } if *minimum < 1 => {
                return Err(SchemaError::InvalidMinimum {
                    field: field.key.clone(),
                    minimum: *minimum,
                });
            }
            _ => {}
        }
    }
    Ok(())
}
