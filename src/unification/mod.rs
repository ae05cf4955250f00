//! Unification, matching, and substitution for first-order terms

mod matching;
pub mod mgu;
pub mod substitution;

#[cfg(test)]
mod proptest_tests;

pub use matching::match_term;
pub use mgu::{unify, UnificationError, UnificationResult};
pub use substitution::Substitution;
