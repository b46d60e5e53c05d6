// crates/admin-settings-core/tests/resolver.rs
// ============================================================================
// Module: Field Resolver Tests
// Description: Tests for disablement, visibility, and environment flags.
// Purpose: Validate gate semantics against form values and license flags.
// Dependencies: admin-settings-core, serde_json
// ============================================================================
//! ## Overview
//! Covers AND/OR gates, license gates, pattern matching, forced boolean
//! values, visibility gates, and environment override truthiness.

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

use admin_settings_core::Condition;
use admin_settings_core::ConfigDocument;
use admin_settings_core::ControlType;
use admin_settings_core::FieldDescriptor;
use admin_settings_core::FormValues;
use admin_settings_core::LicenseFlags;
use admin_settings_core::ValuePattern;
use admin_settings_core::runtime::effective_value;
use admin_settings_core::runtime::is_disabled;
use admin_settings_core::runtime::is_hidden;
use admin_settings_core::runtime::is_set_by_env;
use admin_settings_core::runtime::is_truthy;
use serde_json::Value;
use serde_json::json;

fn values(pairs: &[(&str, Value)]) -> FormValues {
    pairs.iter().map(|(key, value)| ((*key).to_string(), value.clone())).collect()
}

fn text(key: &str) -> FieldDescriptor {
    FieldDescriptor::new(
        key,
        ControlType::Text {
            placeholder: None,
            max_length: None,
            multiline: false,
        },
    )
}

// ============================================================================
// SECTION: Requires
// ============================================================================

#[test]
fn field_without_gates_is_enabled() {
    let field = text("Name");
    assert!(!is_disabled(&field, &FormValues::new(), &LicenseFlags::new()));
}

#[test]
fn requires_is_and_of_every_pair() {
    let field = text("Name")
        .requiring(Condition::equals("A", true))
        .requiring(Condition::equals("B", "on"));
    let license = LicenseFlags::new();
    assert!(!is_disabled(&field, &values(&[("A", json!(true)), ("B", json!("on"))]), &license));
    assert!(is_disabled(&field, &values(&[("A", json!(false)), ("B", json!("on"))]), &license));
    assert!(is_disabled(&field, &values(&[("A", json!(true)), ("B", json!("off"))]), &license));
}

#[test]
fn equality_is_strict_across_types() {
    let field = text("Name").requiring(Condition::equals("A", true));
    let license = LicenseFlags::new();
    assert!(is_disabled(&field, &values(&[("A", json!("true"))]), &license));
    assert!(is_disabled(&field, &values(&[("A", json!(1))]), &license));
    let numeric = text("Name").requiring(Condition::equals("N", 1));
    assert!(!is_disabled(&numeric, &values(&[("N", json!(1.0))]), &license));
}

#[test]
fn missing_dependency_value_compares_as_null() {
    let field = text("Name").requiring(Condition::equals("A", Value::Null));
    assert!(!is_disabled(&field, &FormValues::new(), &LicenseFlags::new()));
}

#[test]
fn pattern_conditions_match_text_form() {
    let pattern = ValuePattern::new("^(ldap|saml)$").unwrap();
    let field = text("Name").requiring(Condition::matches("Service", pattern));
    let license = LicenseFlags::new();
    assert!(!is_disabled(&field, &values(&[("Service", json!("saml"))]), &license));
    assert!(is_disabled(&field, &values(&[("Service", json!("gitlab"))]), &license));
    let numeric =
        text("Port").requiring(Condition::matches("Size", ValuePattern::new("^1\\d$").unwrap()));
    assert!(!is_disabled(&numeric, &values(&[("Size", json!(12))]), &license));
    assert!(is_disabled(&numeric, &values(&[("Size", json!(null))]), &license));
}

// ============================================================================
// SECTION: Requires Any
// ============================================================================

#[test]
fn requires_any_passes_when_one_pair_matches() {
    let field = text("Name")
        .requiring_any(Condition::equals("A", true))
        .requiring_any(Condition::equals("B", true));
    let license = LicenseFlags::new();
    assert!(!is_disabled(&field, &values(&[("A", json!(false)), ("B", json!(true))]), &license));
    assert!(is_disabled(&field, &values(&[("A", json!(false)), ("B", json!(false))]), &license));
}

#[test]
fn requires_any_is_checked_even_when_requires_pass() {
    let field = text("Name")
        .requiring(Condition::equals("A", true))
        .requiring_any(Condition::equals("B", "x"))
        .requiring_any(Condition::equals("C", "y"));
    let license = LicenseFlags::new();
    let all_any_fail = values(&[("A", json!(true)), ("B", json!("no")), ("C", json!("no"))]);
    assert!(is_disabled(&field, &all_any_fail, &license));
    let one_any_passes = values(&[("A", json!(true)), ("B", json!("no")), ("C", json!("y"))]);
    assert!(!is_disabled(&field, &one_any_passes, &license));
    let requires_fail = values(&[("A", json!(false)), ("B", json!("x")), ("C", json!("y"))]);
    assert!(is_disabled(&field, &requires_fail, &license));
}

// ============================================================================
// SECTION: License Gates
// ============================================================================

#[test]
fn license_flag_gates() {
    let mut needs = text("Name");
    needs.requires_license_flag = Some("LDAP".to_string());
    let mut needs_not = text("Other");
    needs_not.requires_no_license_flag = Some("Cloud".to_string());
    let none = LicenseFlags::new();
    let licensed = LicenseFlags::new().with("LDAP", true).with("Cloud", true);
    let empty = FormValues::new();

    assert!(is_disabled(&needs, &empty, &none));
    assert!(!is_disabled(&needs, &empty, &licensed));
    assert!(is_disabled(&needs, &empty, &LicenseFlags::new().with("LDAP", false)));
    assert!(!is_disabled(&needs_not, &empty, &none));
    assert!(is_disabled(&needs_not, &empty, &licensed));
}

// ============================================================================
// SECTION: Forced Values
// ============================================================================

#[test]
fn disabled_bool_reads_false() {
    let field = FieldDescriptor::new("Feature", ControlType::Bool)
        .requiring(Condition::equals("Enable", true));
    let form = values(&[("Enable", json!(false)), ("Feature", json!(true))]);
    assert_eq!(effective_value(&field, &form, &LicenseFlags::new()), json!(false));
    let enabled = values(&[("Enable", json!(true)), ("Feature", json!(true))]);
    assert_eq!(effective_value(&field, &enabled, &LicenseFlags::new()), json!(true));
}

#[test]
fn disabled_text_keeps_stored_value() {
    let field = text("Name").requiring(Condition::equals("Enable", true));
    let form = values(&[("Enable", json!(false)), ("Name", json!("x"))]);
    assert_eq!(effective_value(&field, &form, &LicenseFlags::new()), json!("x"));
}

// ============================================================================
// SECTION: Visibility + Environment
// ============================================================================

#[test]
fn hidden_unless_gates_visibility_only() {
    let mut field = text("Advanced");
    field.hidden_unless = vec![Condition::equals("ShowAdvanced", true)];
    let license = LicenseFlags::new();
    let hidden = values(&[("ShowAdvanced", json!(false))]);
    assert!(is_hidden(&field, &hidden, &license));
    assert!(!is_disabled(&field, &hidden, &license));
    assert!(!is_hidden(&field, &values(&[("ShowAdvanced", json!(true))]), &license));
    assert!(!is_hidden(&text("Plain"), &FormValues::new(), &license));
}

#[test]
fn set_by_env_requires_truthy_override() {
    let overrides = ConfigDocument::new(json!({
        "ServiceSettings": {"SiteURL": "https://example.test", "Blank": "", "Off": false, "Zero": 0},
        "Absolute": {"Flag": true}
    }));
    assert!(is_set_by_env(&text("SiteURL"), "ServiceSettings", &overrides));
    assert!(!is_set_by_env(&text("Blank"), "ServiceSettings", &overrides));
    assert!(!is_set_by_env(&text("Off"), "ServiceSettings", &overrides));
    assert!(!is_set_by_env(&text("Zero"), "ServiceSettings", &overrides));
    assert!(!is_set_by_env(&text("Missing"), "ServiceSettings", &overrides));
    assert!(is_set_by_env(&text("Absolute.Flag"), "ServiceSettings", &overrides));
}

#[test]
fn truthiness_matches_loose_rules() {
    for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
        assert!(!is_truthy(&falsy), "{falsy} should be falsy");
    }
    for truthy in [json!(true), json!(1), json!(-1), json!("0"), json!([]), json!({})] {
        assert!(is_truthy(&truthy), "{truthy} should be truthy");
    }
}
