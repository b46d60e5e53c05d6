// crates/requirement-logic/src/requirement.rs
// ============================================================================
// Module: Requirement Tree
// Description: Boolean combinators over typed gate predicates.
// Purpose: Evaluate AND/OR/NOT trees with short-circuiting.
// Dependencies: serde, smallvec
// ============================================================================

//! ## Overview
//! A [`Requirement`] is a tree of logical operators whose leaves are domain
//! predicates. Operators never inspect domain state; each leaf is tested
//! through [`PredicateEval`] against a caller-supplied reader.
//!
//! ## Invariants
//! - An empty `All` holds; an empty `Any` does not.
//! - Children are evaluated in order and evaluation stops at the first
//!   child that decides the result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use smallvec::SmallVec;

use crate::traits::PredicateEval;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Inline capacity for operator children.
const INLINE_CHILDREN: usize = 4;

/// Children of an `All` or `Any` node.
pub type Children<P> = SmallVec<[Box<Requirement<P>>; INLINE_CHILDREN]>;

/// Gate expression over predicates of type `P`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement<P> {
    /// Holds when every child holds.
    All(Children<P>),
    /// Holds when at least one child holds.
    Any(Children<P>),
    /// Holds when the child does not.
    Not(Box<Self>),
    /// Leaf tested by the domain.
    Predicate(P),
}

impl<P> Requirement<P> {
    /// Conjunction of `children`.
    pub fn all(children: impl IntoIterator<Item = Self>) -> Self {
        Self::All(children.into_iter().map(Box::new).collect())
    }

    /// Disjunction of `children`.
    pub fn any(children: impl IntoIterator<Item = Self>) -> Self {
        Self::Any(children.into_iter().map(Box::new).collect())
    }

    /// Negation of `child`.
    #[must_use]
    pub fn negate(child: Self) -> Self {
        Self::Not(Box::new(child))
    }

    /// Leaf wrapping `predicate`.
    pub const fn predicate(predicate: P) -> Self {
        Self::Predicate(predicate)
    }

    /// Tests the tree against `reader`.
    pub fn eval(&self, reader: &P::Reader<'_>) -> bool
    where
        P: PredicateEval,
    {
        match self {
            Self::All(children) => children.iter().all(|child| child.eval(reader)),
            Self::Any(children) => children.iter().any(|child| child.eval(reader)),
            Self::Not(child) => !child.eval(reader),
            Self::Predicate(predicate) => predicate.eval(reader),
        }
    }
}
