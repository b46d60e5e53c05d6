// crates/admin-settings-core/src/runtime/resolver.rs
// ============================================================================
// Module: Field Resolver
// Description: Visibility, disablement, and forced-value decisions per field.
// Purpose: Evaluate field gates against current form values and license flags.
// Dependencies: crate::core, requirement-logic, serde_json
// ============================================================================

//! ## Overview
//! Field gates compile to a requirement tree:
//! `All[requires.., Any[requires_any..], license gates..]`, where a forbidden
//! license flag is a negated leaf. The `requires_any` group only appears when
//! it has entries, so an empty list never disables a field. The tree is
//! evaluated against a [`GateReader`] over the current form values and
//! license flags.
//!
//! Everything here is pure and synchronous. Callers recompute on every read
//! because any edit may change a dependency.

// ============================================================================
// SECTION: Imports
// ============================================================================

use requirement_logic::PredicateEval;
use requirement_logic::Requirement;
use serde_json::Value;

use crate::core::Condition;
use crate::core::ConfigDocument;
use crate::core::FieldDescriptor;
use crate::core::FormValues;
use crate::core::LicenseFlags;

// ============================================================================
// SECTION: Gate Predicates
// ============================================================================

/// Atomic gate borrowed from a field descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldGate<'a> {
    /// Another field's value must match.
    Matches(&'a Condition),
    /// License flag is enabled.
    License(&'a str),
}

/// Read-only view of the state gates inspect.
#[derive(Debug, Clone, Copy)]
pub struct GateReader<'r> {
    /// Current form values.
    pub values: &'r FormValues,
    /// License flags.
    pub license: &'r LicenseFlags,
}

impl PredicateEval for FieldGate<'_> {
    type Reader<'r> = GateReader<'r>;

    fn eval(&self, reader: &Self::Reader<'_>) -> bool {
        match self {
            Self::Matches(condition) => {
                condition.expected.matches(reader.values.get(&condition.key))
            }
            Self::License(flag) => reader.license.is_enabled(flag),
        }
    }
}

/// Builds the requirement that must hold for `field` to be enabled.
#[must_use]
pub fn enablement_requirement(field: &FieldDescriptor) -> Requirement<FieldGate<'_>> {
    let mut gates: Vec<Requirement<FieldGate<'_>>> =
        field.requires.iter().map(condition_gate).collect();
    if !field.requires_any.is_empty() {
        gates.push(Requirement::any(field.requires_any.iter().map(condition_gate)));
    }
    if let Some(flag) = &field.requires_license_flag {
        gates.push(Requirement::predicate(FieldGate::License(flag)));
    }
    if let Some(flag) = &field.requires_no_license_flag {
        gates.push(Requirement::negate(Requirement::predicate(FieldGate::License(flag))));
    }
    Requirement::all(gates)
}

/// Builds the requirement that must hold for `field` to be shown.
#[must_use]
pub fn visibility_requirement(field: &FieldDescriptor) -> Requirement<FieldGate<'_>> {
    Requirement::all(field.hidden_unless.iter().map(condition_gate))
}

/// Leaf testing one condition.
fn condition_gate(condition: &Condition) -> Requirement<FieldGate<'_>> {
    Requirement::predicate(FieldGate::Matches(condition))
}

// ============================================================================
// SECTION: Resolver Functions
// ============================================================================

/// Returns true when the field's gates do not hold.
#[must_use]
pub fn is_disabled(field: &FieldDescriptor, values: &FormValues, license: &LicenseFlags) -> bool {
    let reader = GateReader {
        values,
        license,
    };
    !enablement_requirement(field).eval(&reader)
}

/// Returns true when the field's visibility gate does not hold.
#[must_use]
pub fn is_hidden(field: &FieldDescriptor, values: &FormValues, license: &LicenseFlags) -> bool {
    let reader = GateReader {
        values,
        license,
    };
    !visibility_requirement(field).eval(&reader)
}

/// Returns the value consumers should see for `field`.
///
/// A disabled boolean reads as `false` whatever is stored.
#[must_use]
pub fn effective_value(
    field: &FieldDescriptor,
    values: &FormValues,
    license: &LicenseFlags,
) -> Value {
    if field.control.is_bool() && is_disabled(field, values, license) {
        return Value::Bool(false);
    }
    values.get(&field.key).cloned().unwrap_or(Value::Null)
}

/// Returns true when the environment overrides force a value for `field`.
///
/// Only truthy override values count.
#[must_use]
pub fn is_set_by_env(field: &FieldDescriptor, schema_id: &str, overrides: &ConfigDocument) -> bool {
    overrides.get(&field.config_path(schema_id)).is_some_and(is_truthy)
}

/// Truthiness of a JSON value: `null`, `false`, zero, NaN, and `""` are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// SECTION: Field Status
// ============================================================================

/// Resolved state of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldStatus {
    /// Gates do not hold.
    pub disabled: bool,
    /// Visibility gate does not hold.
    pub hidden: bool,
    /// Value is forced by deployment environment.
    pub set_by_env: bool,
}

impl FieldStatus {
    /// Resolves every flag for `field`.
    #[must_use]
    pub fn resolve(
        field: &FieldDescriptor,
        schema_id: &str,
        values: &FormValues,
        license: &LicenseFlags,
        overrides: &ConfigDocument,
    ) -> Self {
        Self {
            disabled: is_disabled(field, values, license),
            hidden: is_hidden(field, values, license),
            set_by_env: is_set_by_env(field, schema_id, overrides),
        }
    }

    /// Returns true when the control must be read-only.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        self.disabled || self.set_by_env
    }
}
