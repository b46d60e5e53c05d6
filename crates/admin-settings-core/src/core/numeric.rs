// crates/admin-settings-core/src/core/numeric.rs
// ============================================================================
// Module: Numeric Coercion
// Description: Integer parsing with fallback and floor policies.
// Purpose: Turn free-form numeric input into an always-valid setting value.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Numeric inputs are never rejected. Input is parsed with prefix semantics
//! (leading whitespace, optional sign, leading digits; the rest is ignored).
//! Unparsable input resolves to the caller fallback or the policy floor, and
//! parsed values below the floor are raised to it.
//!
//! Invariants:
//! - The result of [`parse_int_with_policy`] always satisfies the policy.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Policies
// ============================================================================

/// Minimum applied by [`NumericPolicy::NonZero`] when none is configured.
pub const DEFAULT_NON_ZERO_MINIMUM: i64 = 1;

/// Floor applied to coerced integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumericPolicy {
    /// No floor; negative values are accepted.
    #[default]
    Any,
    /// Values below zero become zero.
    NonNegative,
    /// Values below `minimum` become `minimum`.
    NonZero {
        /// Smallest accepted value (at least 1).
        #[serde(default = "default_non_zero_minimum")]
        minimum: i64,
    },
}

/// Serde default for the non-zero minimum.
const fn default_non_zero_minimum() -> i64 {
    DEFAULT_NON_ZERO_MINIMUM
}

impl NumericPolicy {
    /// Non-zero policy with the default minimum of 1.
    #[must_use]
    pub const fn non_zero() -> Self {
        Self::NonZero {
            minimum: DEFAULT_NON_ZERO_MINIMUM,
        }
    }

    /// Returns the lowest value the policy accepts, if bounded.
    #[must_use]
    pub const fn floor(self) -> Option<i64> {
        match self {
            Self::Any => None,
            Self::NonNegative => Some(0),
            Self::NonZero {
                minimum,
            } => Some(minimum),
        }
    }

    /// Raises `value` to the policy floor.
    #[must_use]
    pub const fn clamp(self, value: i64) -> i64 {
        match self.floor() {
            Some(floor) if value < floor => floor,
            _ => value,
        }
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses the leading integer of `raw`, returning `None` when no digit leads.
///
/// Values outside the `i64` range saturate.
#[must_use]
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = trimmed.strip_prefix('-').map_or_else(
        || (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        |rest| (true, rest),
    );

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for ch in unsigned.chars() {
        let Some(digit) = ch.to_digit(10) else {
            break;
        };
        seen_digit = true;
        let digit = i64::from(digit);
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    seen_digit.then_some(value)
}

/// Parses `raw` and applies `policy`, substituting `fallback` on failure.
///
/// Unparsable input yields `fallback` when given, otherwise the policy floor
/// (0 for [`NumericPolicy::Any`]). The substitute is clamped like any parsed
/// value, so a fallback of 0 under a non-zero policy yields the minimum.
#[must_use]
pub fn parse_int_with_policy(raw: &str, policy: NumericPolicy, fallback: Option<i64>) -> i64 {
    parse_leading_int(raw).map_or_else(
        || policy.clamp(fallback.or(policy.floor()).unwrap_or(0)),
        |value| policy.clamp(value),
    )
}

/// Coerces a stored or edited JSON value into an integer under `policy`.
///
/// Strings and numbers are parsed from their text form; any other value is
/// treated as unparsable.
#[must_use]
pub fn coerce_integer(value: &Value, policy: NumericPolicy, fallback: Option<i64>) -> i64 {
    match value {
        Value::String(text) => parse_int_with_policy(text, policy, fallback),
        Value::Number(number) => parse_int_with_policy(&number.to_string(), policy, fallback),
        _ => parse_int_with_policy("", policy, fallback),
    }
}
