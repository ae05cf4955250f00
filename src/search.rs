//! Search over symbol orderings
//!
//! Completion is a function of the chosen precedence and status map; this
//! module enumerates candidate assignments and runs completion until one of
//! them succeeds. Candidates are decoded from a dense index (permutation in
//! factorial base, statuses as a bitmask), so a candidate is a pure function
//! of its index and the parallel driver picks the same winner as the
//! sequential one.

use crate::completion::complete;
use crate::config::CompletionConfig;
use crate::interner::{FunctionId, Interner};
use crate::ordering::{Rpo, RpoConfig, Status};
use crate::rule::{Equation, Rule};
use crate::term::Term;
use indexmap::IndexSet;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use thiserror::Error;

/// Why the ordering search gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no symbol ordering yields a convergent system")]
    NoOrdering,
    #[error("too many function symbols for exhaustive ordering search: {0}")]
    TooManySymbols(usize),
}

/// Exhaustive enumeration needs n! * 2^n candidates; beyond this the caller
/// should pick an ordering by hand.
const MAX_SEARCH_SYMBOLS: usize = 10;

/// Function symbols occurring in the equations, in first-occurrence order
pub fn function_symbols(equations: &[Equation]) -> Vec<FunctionId> {
    let mut symbols = IndexSet::new();
    for eq in equations {
        collect_symbols(&eq.left, &mut symbols);
        collect_symbols(&eq.right, &mut symbols);
    }
    symbols.into_iter().collect()
}

fn collect_symbols(term: &Term, symbols: &mut IndexSet<FunctionId>) {
    if let Term::Function(f, args) = term {
        symbols.insert(f.id);
        for arg in args {
            collect_symbols(arg, symbols);
        }
    }
}

fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}

/// Decode candidate `index` into a precedence permutation plus a status
/// assignment. The low bits select statuses (0 = lexicographic, so all-lex
/// comes first for every permutation); the rest selects the permutation in
/// factorial base.
fn candidate(symbols: &[FunctionId], index: u64) -> RpoConfig {
    let n = symbols.len();
    let mask = index & ((1u64 << n) - 1);
    let mut perm_index = index >> n;

    let mut remaining = symbols.to_vec();
    let mut precedence = Vec::with_capacity(n);
    for i in (1..=n).rev() {
        let block = factorial(i - 1);
        let k = (perm_index / block) as usize;
        perm_index %= block;
        precedence.push(remaining.remove(k));
    }

    let mut config = RpoConfig::new(precedence);
    for (j, &symbol) in symbols.iter().enumerate() {
        if mask >> j & 1 == 1 {
            config.set_status(symbol, Status::Multiset);
        }
    }
    config
}

/// Explicit iterator over every `(precedence, status)` candidate for a
/// symbol set
pub struct OrderingCandidates {
    symbols: Vec<FunctionId>,
    next: u64,
    total: u64,
}

impl OrderingCandidates {
    pub fn new(symbols: Vec<FunctionId>) -> Result<Self, SearchError> {
        if symbols.len() > MAX_SEARCH_SYMBOLS {
            return Err(SearchError::TooManySymbols(symbols.len()));
        }
        let total = factorial(symbols.len()) << symbols.len();
        Ok(OrderingCandidates {
            symbols,
            next: 0,
            total,
        })
    }

    /// Number of candidates in the enumeration
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Iterator for OrderingCandidates {
    type Item = RpoConfig;

    fn next(&mut self) -> Option<RpoConfig> {
        if self.next >= self.total {
            return None;
        }
        let config = candidate(&self.symbols, self.next);
        self.next += 1;
        Some(config)
    }
}

/// Complete the equations by searching for a workable symbol ordering: the
/// first candidate (in enumeration order) whose completion succeeds wins.
/// Returns the convergent rules together with the winning ordering.
pub fn equations_trs(
    equations: &[Equation],
    config: &CompletionConfig,
    interner: &mut Interner,
) -> Result<(Vec<Rule>, RpoConfig), SearchError> {
    let symbols = function_symbols(equations);
    for rpo_config in OrderingCandidates::new(symbols)? {
        let rpo = Rpo::new(rpo_config.clone());
        let mut scratch = interner.clone();
        match complete(equations.to_vec(), &rpo, config, &mut scratch) {
            Ok(rules) => {
                log::info!("ordering search succeeded with {} rules", rules.len());
                *interner = scratch;
                return Ok((rules, rpo_config));
            }
            Err(err) => {
                log::debug!("ordering candidate rejected: {}", err);
            }
        }
    }
    Err(SearchError::NoOrdering)
}

/// Parallel variant of [`equations_trs`]. Candidates run concurrently on
/// interner clones; the winner is still the lowest-index success, so the
/// result matches the sequential driver.
pub fn equations_trs_par(
    equations: &[Equation],
    config: &CompletionConfig,
    interner: &mut Interner,
) -> Result<(Vec<Rule>, RpoConfig), SearchError> {
    let symbols = function_symbols(equations);
    let total = OrderingCandidates::new(symbols.clone())?.total();
    let base = interner.clone();

    let found = (0..total).into_par_iter().find_map_first(|index| {
        let rpo_config = candidate(&symbols, index);
        let rpo = Rpo::new(rpo_config.clone());
        let mut scratch = base.clone();
        complete(equations.to_vec(), &rpo, config, &mut scratch)
            .ok()
            .map(|rules| (rules, rpo_config, scratch))
    });

    match found {
        Some((rules, rpo_config, scratch)) => {
            log::info!("ordering search succeeded with {} rules", rules.len());
            *interner = scratch;
            Ok((rules, rpo_config))
        }
        None => Err(SearchError::NoOrdering),
    }
}
