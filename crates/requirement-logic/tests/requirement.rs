// crates/requirement-logic/tests/requirement.rs
// ============================================================================
// Module: Requirement Tree Tests
// Description: Tests for gate evaluation order and identities.
// Purpose: Ensure combinators short-circuit and empty nodes behave.
// Dependencies: requirement-logic, serde_json
// ============================================================================
//! ## Overview
//! Evaluates small trees over named switches while recording which leaves
//! were actually tested.

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

use std::cell::RefCell;
use std::collections::BTreeMap;

use requirement_logic::PredicateEval;
use requirement_logic::Requirement;

/// Leaf testing one named switch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Switch(&'static str);

/// Switch states plus a log of tested names.
#[derive(Default)]
struct Probe {
    /// Named switch states; missing switches are off.
    states: BTreeMap<&'static str, bool>,
    /// Names in the order they were tested.
    tested: RefCell<Vec<&'static str>>,
}

impl Probe {
    fn with(pairs: &[(&'static str, bool)]) -> Self {
        Self {
            states: pairs.iter().copied().collect(),
            tested: RefCell::default(),
        }
    }

    fn tested(&self) -> Vec<&'static str> {
        self.tested.borrow().clone()
    }
}

impl PredicateEval for Switch {
    type Reader<'a> = Probe;

    fn eval(&self, reader: &Self::Reader<'_>) -> bool {
        reader.tested.borrow_mut().push(self.0);
        reader.states.get(self.0).copied().unwrap_or(false)
    }
}

fn leaves(names: &[&'static str]) -> Vec<Requirement<Switch>> {
    names.iter().map(|&name| Requirement::predicate(Switch(name))).collect()
}

#[test]
fn empty_all_holds_and_empty_any_does_not() {
    let probe = Probe::default();
    assert!(Requirement::<Switch>::all([]).eval(&probe));
    assert!(!Requirement::<Switch>::any([]).eval(&probe));
}

#[test]
fn all_stops_at_first_failing_child() {
    let probe = Probe::with(&[("a", true), ("b", false), ("c", true)]);
    assert!(!Requirement::all(leaves(&["a", "b", "c"])).eval(&probe));
    assert_eq!(probe.tested(), vec!["a", "b"]);
}

#[test]
fn any_stops_at_first_passing_child() {
    let probe = Probe::with(&[("a", false), ("b", true)]);
    assert!(Requirement::any(leaves(&["a", "b", "c"])).eval(&probe));
    assert_eq!(probe.tested(), vec!["a", "b"]);
}

#[test]
fn negation_inverts_subtree() {
    let probe = Probe::with(&[("licensed", true)]);
    let unlicensed = Requirement::negate(Requirement::predicate(Switch("licensed")));
    assert!(!unlicensed.eval(&probe));
    assert!(Requirement::negate(unlicensed).eval(&probe));
}

#[test]
fn nested_gate_combines_conjunction_and_disjunction() {
    // enabled AND (s3 OR azure) AND NOT readonly
    let gate = Requirement::all([
        Requirement::predicate(Switch("enabled")),
        Requirement::any(leaves(&["s3", "azure"])),
        Requirement::negate(Requirement::predicate(Switch("readonly"))),
    ]);
    assert!(gate.eval(&Probe::with(&[("enabled", true), ("azure", true)])));
    assert!(!gate.eval(&Probe::with(&[("enabled", true)])));
    assert!(!gate.eval(&Probe::with(&[("enabled", true), ("s3", true), ("readonly", true)])));
}

#[test]
fn tree_serializes_with_snake_case_tags() {
    let gate = Requirement::any([
        Requirement::predicate("x".to_string()),
        Requirement::negate(Requirement::predicate("y".to_string())),
    ]);
    let json = serde_json::to_value(&gate).unwrap();
    assert_eq!(json, serde_json::json!({"any": [{"predicate": "x"}, {"not": {"predicate": "y"}}]}));
    let back: Requirement<String> = serde_json::from_value(json).unwrap();
    assert_eq!(back, gate);
}
