// crates/requirement-logic/src/lib.rs
// ============================================================================
// Module: Requirement Logic Library
// Description: Public API surface for gate expressions.
// Purpose: Expose the requirement tree and the predicate boundary trait.
// Dependencies: crate::{requirement, traits}
// ============================================================================

//! ## Overview
//! A small boolean algebra over domain predicates. Callers describe gating
//! rules as a [`Requirement`] tree and supply a [`PredicateEval`]
//! implementation that tests one leaf against a domain reader.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod requirement;
pub mod traits;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use requirement::Children;
pub use requirement::Requirement;
pub use traits::PredicateEval;
