//! Convergent: Knuth-Bendix completion for equational theories
//!
//! Given a finite set of equations, completion produces a terminating and
//! confluent rewrite system equivalent to it, so the word problem reduces to
//! comparing normal forms. Termination comes from a recursive path ordering
//! with per-symbol lexicographic/multiset status; confluence comes from
//! resolving every critical pair. Callers hand in terms as syntax trees and
//! get rule lists back; parsing and printing live outside this crate.

pub mod completion;
pub mod config;
pub mod critical_pairs;
pub mod interner;
pub mod ordering;
pub mod rewrite;
pub mod rule;
pub mod search;
pub mod term;
pub mod unification;

// Re-export the working vocabulary of the crate
pub use completion::{complete, CompletionError};
pub use config::{BudgetExhausted, CompletionConfig};
pub use critical_pairs::critical_pairs;
pub use interner::{FunctionId, Interner, VariableId};
pub use ordering::{
    lexicographic_compare, multiset_compare, Ordering, Precedence, Rpo, RpoConfig, Status,
};
pub use rewrite::{normal_form, rewrite_root};
pub use rule::{Equation, Rule, RuleError};
pub use search::{
    equations_trs, equations_trs_par, function_symbols, OrderingCandidates, SearchError,
};
pub use term::{FunctionSymbol, Term, TermDisplay, Variable};
pub use unification::{match_term, unify, Substitution, UnificationError, UnificationResult};
