//! Term orderings: precedence, lexicographic and multiset extensions, and
//! the recursive path ordering (RPO) with per-symbol status
//!
//! RPO is a simplification ordering: well-founded, closed under contexts and
//! substitutions. Any rewrite system whose rules it orients terminates,
//! which is what completion relies on.

use crate::interner::FunctionId;
use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;


/// Result of comparing two terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Greater,
    Less,
    Equal,
    Incomparable,
}

/// Argument comparison strategy for a function symbol: when two terms share
/// a head symbol, its status decides how their argument lists are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Lexicographic,
    Multiset,
}

/// A total precedence on function symbols, given as a sequence where earlier
/// means smaller. Symbols outside the sequence are incomparable to
/// everything but themselves.
#[derive(Debug, Clone)]
pub struct Precedence {
    ranks: HashMap<FunctionId, usize>,
}

impl Precedence {
    /// Build a precedence from a symbol sequence, earlier = smaller
    pub fn new(symbols: &[FunctionId]) -> Self {
        let ranks = symbols.iter().enumerate().map(|(i, &f)| (f, i)).collect();
        Precedence { ranks }
    }

    /// Compare two symbols by their position in the sequence
    pub fn compare(&self, f: FunctionId, g: FunctionId) -> Ordering {
        if f == g {
            return Ordering::Equal;
        }
        match (self.ranks.get(&f), self.ranks.get(&g)) {
            (Some(i), Some(j)) if i > j => Ordering::Greater,
            (Some(i), Some(j)) if i < j => Ordering::Less,
            _ => Ordering::Incomparable,
        }
    }
}

/// Lexicographic lift of an element ordering over sequences of equal
/// length: the first non-equal position decides. Sequences of different
/// lengths are incomparable.
pub fn lexicographic_compare<F>(cmp: &F, xs: &[Term], ys: &[Term]) -> Ordering
where
    F: Fn(&Term, &Term) -> Ordering,
{
    if xs.len() != ys.len() {
        return Ordering::Incomparable;
    }
    for (x, y) in xs.iter().zip(ys.iter()) {
        match cmp(x, y) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }
    Ordering::Equal
}

/// Multiset extension of an element ordering (Dershowitz). Elements equal
/// under `cmp` cancel pairwise; of the remainders X and Y, the side that
/// strictly dominates every leftover element of the other side wins.
pub fn multiset_compare<F>(cmp: &F, xs: &[Term], ys: &[Term]) -> Ordering
where
    F: Fn(&Term, &Term) -> Ordering,
{
    // Cancel cmp-equal elements pairwise
    let mut ys_rest: Vec<&Term> = ys.iter().collect();
    let mut xs_rest: Vec<&Term> = Vec::new();
    for x in xs {
        if let Some(pos) = ys_rest.iter().position(|&y| cmp(x, y) == Ordering::Equal) {
            ys_rest.remove(pos);
        } else {
            xs_rest.push(x);
        }
    }

    if xs_rest.is_empty() && ys_rest.is_empty() {
        return Ordering::Equal;
    }
    let greater = ys_rest
        .iter()
        .all(|&y| xs_rest.iter().any(|&x| cmp(x, y) == Ordering::Greater));
    if greater && !xs_rest.is_empty() {
        return Ordering::Greater;
    }
    let less = xs_rest
        .iter()
        .all(|&x| ys_rest.iter().any(|&y| cmp(x, y) == Ordering::Less));
    if less && !ys_rest.is_empty() {
        return Ordering::Less;
    }
    Ordering::Incomparable
}

/// Configuration for the recursive path ordering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpoConfig {
    /// Precedence sequence, earlier = smaller
    pub precedence: Vec<FunctionId>,
    /// Per-symbol status; unmapped symbols default to lexicographic
    pub status: HashMap<FunctionId, Status>,
}

impl RpoConfig {
    /// All-lexicographic configuration over the given precedence sequence
    pub fn new(precedence: Vec<FunctionId>) -> Self {
        RpoConfig {
            precedence,
            status: HashMap::new(),
        }
    }

    /// Assign a status to a symbol
    pub fn set_status(&mut self, symbol: FunctionId, status: Status) {
        self.status.insert(symbol, status);
    }
}

/// Recursive path ordering with status
pub struct Rpo {
    config: RpoConfig,
    precedence: Precedence,
}

impl Rpo {
    pub fn new(config: RpoConfig) -> Self {
        let precedence = Precedence::new(&config.precedence);
        Rpo { config, precedence }
    }

    pub fn config(&self) -> &RpoConfig {
        &self.config
    }

    fn status(&self, f: FunctionId) -> Status {
        self.config
            .status
            .get(&f)
            .copied()
            .unwrap_or(Status::Lexicographic)
    }

    /// Compare two terms. The result is antisymmetric by construction:
    /// `compare(s, t) == Greater` exactly when `compare(t, s) == Less`.
    pub fn compare(&self, s: &Term, t: &Term) -> Ordering {
        match (s, t) {
            (Term::Variable(x), Term::Variable(y)) => {
                if x.id == y.id {
                    Ordering::Equal
                } else {
                    Ordering::Incomparable
                }
            }
            // A term dominates exactly the variables occurring in it
            (Term::Function(_, _), Term::Variable(y)) => {
                if s.contains_variable(y.id) {
                    Ordering::Greater
                } else {
                    Ordering::Incomparable
                }
            }
            (Term::Variable(x), Term::Function(_, _)) => {
                if t.contains_variable(x.id) {
                    Ordering::Less
                } else {
                    Ordering::Incomparable
                }
            }
            (Term::Function(f, ss), Term::Function(g, ts)) => {
                // Subterm property: if some argument of s already reaches t,
                // the whole of s is above t (and symmetrically)
                if ss
                    .iter()
                    .any(|si| matches!(self.compare(si, t), Ordering::Greater | Ordering::Equal))
                {
                    return Ordering::Greater;
                }
                if ts
                    .iter()
                    .any(|tj| matches!(self.compare(s, tj), Ordering::Less | Ordering::Equal))
                {
                    return Ordering::Less;
                }

                match self.precedence.compare(f.id, g.id) {
                    Ordering::Greater => {
                        if ts.iter().all(|tj| self.compare(s, tj) == Ordering::Greater) {
                            Ordering::Greater
                        } else {
                            Ordering::Incomparable
                        }
                    }
                    Ordering::Less => {
                        if ss.iter().all(|si| self.compare(si, t) == Ordering::Less) {
                            Ordering::Less
                        } else {
                            Ordering::Incomparable
                        }
                    }
                    Ordering::Equal => {
                        let cmp = |a: &Term, b: &Term| self.compare(a, b);
                        let ext = match self.status(f.id) {
                            Status::Lexicographic => lexicographic_compare(&cmp, ss, ts),
                            Status::Multiset => multiset_compare(&cmp, ss, ts),
                        };
                        match ext {
                            Ordering::Greater => {
                                if ts.iter().all(|tj| self.compare(s, tj) == Ordering::Greater) {
                                    Ordering::Greater
                                } else {
                                    Ordering::Incomparable
                                }
                            }
                            Ordering::Less => {
                                if ss.iter().all(|si| self.compare(si, t) == Ordering::Less) {
                                    Ordering::Less
                                } else {
                                    Ordering::Incomparable
                                }
                            }
                            Ordering::Equal => Ordering::Equal,
                            Ordering::Incomparable => Ordering::Incomparable,
                        }
                    }
                    Ordering::Incomparable => Ordering::Incomparable,
                }
            }
        }
    }
}
