// crates/requirement-logic/src/traits.rs
// ============================================================================
// Module: Predicate Evaluation
// Description: Boundary trait between gate trees and domain state.
// Purpose: Let each domain decide what a leaf predicate means.
// Dependencies: None
// ============================================================================

//! ## Overview
//! Leaves of a [`Requirement`](crate::Requirement) are tested through
//! [`PredicateEval`]. The reader is borrowed for one evaluation so predicates
//! can inspect caller-owned state without cloning it.

// ============================================================================
// SECTION: Predicate Trait
// ============================================================================

/// Tests one predicate against a domain reader.
pub trait PredicateEval {
    /// State the predicate inspects.
    type Reader<'a>;

    /// Returns `true` when the predicate holds.
    fn eval(&self, reader: &Self::Reader<'_>) -> bool;
}
