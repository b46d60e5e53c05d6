// crates/admin-settings-core/tests/numeric.rs
// ============================================================================
// Module: Numeric Coercion Tests
// Description: Tests for integer parsing with fallback and floor policies.
// Purpose: Validate that numeric input always coerces to a policy-valid value.
// Dependencies: admin-settings-core, proptest, serde_json
// ============================================================================
//! ## Overview
//! Covers prefix parsing, fallback selection, and floor clamping, plus
//! property tests that every coerced value satisfies its policy.

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

use admin_settings_core::NumericPolicy;
use admin_settings_core::coerce_integer;
use admin_settings_core::parse_int_with_policy;
use admin_settings_core::parse_leading_int;
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// SECTION: Prefix Parsing
// ============================================================================

#[test]
fn leading_int_follows_prefix_rules() {
    assert_eq!(parse_leading_int("42"), Some(42));
    assert_eq!(parse_leading_int("  -7"), Some(-7));
    assert_eq!(parse_leading_int("+8"), Some(8));
    assert_eq!(parse_leading_int("12abc"), Some(12));
    assert_eq!(parse_leading_int("3.9"), Some(3));
    assert_eq!(parse_leading_int("abc"), None);
    assert_eq!(parse_leading_int(""), None);
    assert_eq!(parse_leading_int("-"), None);
    assert_eq!(parse_leading_int(" + 1"), None);
}

#[test]
fn leading_int_saturates_out_of_range() {
    assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    assert_eq!(parse_leading_int("-99999999999999999999999"), Some(i64::MIN));
}

// ============================================================================
// SECTION: Policies
// ============================================================================

#[test]
fn non_zero_uses_fallback_for_unparsable_input() {
    assert_eq!(parse_int_with_policy("abc", NumericPolicy::non_zero(), Some(10)), 10);
}

#[test]
fn non_zero_raises_zero_to_minimum() {
    assert_eq!(parse_int_with_policy("0", NumericPolicy::non_zero(), Some(10)), 1);
    assert_eq!(parse_int_with_policy("-5", NumericPolicy::non_zero(), None), 1);
}

#[test]
fn non_zero_without_fallback_uses_minimum() {
    assert_eq!(parse_int_with_policy("abc", NumericPolicy::non_zero(), None), 1);
    let policy = NumericPolicy::NonZero {
        minimum: 5,
    };
    assert_eq!(parse_int_with_policy("", policy, None), 5);
    assert_eq!(parse_int_with_policy("3", policy, None), 5);
    assert_eq!(parse_int_with_policy("30", policy, None), 30);
}

#[test]
fn non_zero_treats_zero_fallback_as_absent() {
    assert_eq!(parse_int_with_policy("abc", NumericPolicy::non_zero(), Some(0)), 1);
}

#[test]
fn non_negative_floors_at_zero() {
    assert_eq!(parse_int_with_policy("-3", NumericPolicy::NonNegative, None), 0);
    assert_eq!(parse_int_with_policy("x", NumericPolicy::NonNegative, None), 0);
    assert_eq!(parse_int_with_policy("x", NumericPolicy::NonNegative, Some(60)), 60);
    assert_eq!(parse_int_with_policy("17", NumericPolicy::NonNegative, Some(60)), 17);
}

#[test]
fn any_policy_keeps_negatives() {
    assert_eq!(parse_int_with_policy("-3", NumericPolicy::Any, None), -3);
    assert_eq!(parse_int_with_policy("nope", NumericPolicy::Any, None), 0);
    assert_eq!(parse_int_with_policy("nope", NumericPolicy::Any, Some(-2)), -2);
}

#[test]
fn json_values_coerce_through_text_form() {
    let policy = NumericPolicy::NonNegative;
    assert_eq!(coerce_integer(&json!(12), policy, None), 12);
    assert_eq!(coerce_integer(&json!(2.7), policy, None), 2);
    assert_eq!(coerce_integer(&json!("15 minutes"), policy, None), 15);
    assert_eq!(coerce_integer(&json!(null), policy, Some(4)), 4);
    assert_eq!(coerce_integer(&json!(true), policy, None), 0);
}

#[test]
fn policy_deserializes_with_default_minimum() {
    let policy: NumericPolicy = serde_json::from_value(json!({"kind": "non_zero"})).unwrap();
    assert_eq!(policy, NumericPolicy::non_zero());
    let policy: NumericPolicy = serde_json::from_value(json!({"kind": "non_negative"})).unwrap();
    assert_eq!(policy.floor(), Some(0));
}

// ============================================================================
// SECTION: Properties
// ============================================================================

/// Strategy over every policy kind with small minimums.
fn policy_strategy() -> impl Strategy<Value = NumericPolicy> {
    prop_oneof![
        Just(NumericPolicy::Any),
        Just(NumericPolicy::NonNegative),
        (1_i64 .. 1000).prop_map(|minimum| NumericPolicy::NonZero {
            minimum
        }),
    ]
}

proptest! {
    #[test]
    fn coerced_values_always_satisfy_policy(
        raw in ".{0,24}",
        policy in policy_strategy(),
        fallback in proptest::option::of(-1000_i64 .. 1000),
    ) {
        let value = parse_int_with_policy(&raw, policy, fallback);
        if let Some(floor) = policy.floor() {
            prop_assert!(value >= floor);
        }
    }

    #[test]
    fn in_range_integers_round_trip(value in 1_i64 .. i64::MAX, policy in policy_strategy()) {
        let floor = policy.floor().unwrap_or(0);
        prop_assume!(value >= floor);
        prop_assert_eq!(parse_int_with_policy(&value.to_string(), policy, None), value);
    }
}
