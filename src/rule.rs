//! Equations and rewrite rules

use crate::interner::Interner;
use crate::term::{Term, Variable};
use crate::unification::Substitution;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// An unordered pair of terms claimed equal under the theory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub left: Term,
    pub right: Term,
}

impl Equation {
    pub fn new(left: Term, right: Term) -> Self {
        Equation { left, right }
    }

    /// Format this equation with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> EquationDisplay<'a> {
        EquationDisplay {
            equation: self,
            interner,
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

/// Display wrapper for Equation that resolves symbol names
pub struct EquationDisplay<'a> {
    equation: &'a Equation,
    interner: &'a Interner,
}

impl<'a> fmt::Display for EquationDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}",
            self.equation.left.display(self.interner),
            self.equation.right.display(self.interner)
        )
    }
}

/// Why a rule could not be constructed. Hitting this during completion means
/// the caller fed the engine something broken, so it is surfaced as a hard
/// error rather than a recoverable outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("left-hand side of a rule cannot be a variable")]
    VariableLhs,
    #[error("right-hand side contains a variable not bound by the left-hand side")]
    UnboundRhsVariable,
}

/// A directed rewrite rule `lhs -> rhs`.
///
/// Construction is validated: the left-hand side is never a bare variable
/// and every right-hand-side variable occurs on the left. Each rule carries
/// its own variable scope; `rename_apart` produces a copy with a scope
/// disjoint from everything allocated so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    lhs: Term,
    rhs: Term,
}

impl Rule {
    pub fn new(lhs: Term, rhs: Term) -> Result<Self, RuleError> {
        if matches!(lhs, Term::Variable(_)) {
            return Err(RuleError::VariableLhs);
        }
        let mut lhs_vars = HashSet::new();
        lhs.collect_variable_ids(&mut lhs_vars);
        if rhs.variable_ids().iter().any(|v| !lhs_vars.contains(v)) {
            return Err(RuleError::UnboundRhsVariable);
        }
        Ok(Rule { lhs, rhs })
    }

    pub fn lhs(&self) -> &Term {
        &self.lhs
    }

    pub fn rhs(&self) -> &Term {
        &self.rhs
    }

    /// Combined node count of both sides; completion prefers small rules
    /// when choosing which one to process next
    pub fn size(&self) -> usize {
        self.lhs.size() + self.rhs.size()
    }

    /// Copy this rule with all its variables replaced by fresh ones. Both
    /// sides are renamed through one mapping, so shared variables stay
    /// shared across the arrow.
    pub fn rename_apart(&self, interner: &mut Interner) -> Rule {
        let mut ids = self.lhs.variable_ids();
        ids.extend(self.rhs.variable_ids());

        let mut renaming = Substitution::new();
        let mut seen = HashSet::new();
        for id in ids {
            if seen.insert(id) {
                let fresh = interner.fresh_variable();
                renaming.insert_id(id, Term::Variable(Variable::new(fresh)));
            }
        }
        Rule {
            lhs: self.lhs.apply_substitution(&renaming),
            rhs: self.rhs.apply_substitution(&renaming),
        }
    }

    /// Format this rule with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> RuleDisplay<'a> {
        RuleDisplay {
            rule: self,
            interner,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

/// Display wrapper for Rule that resolves symbol names
pub struct RuleDisplay<'a> {
    rule: &'a Rule,
    interner: &'a Interner,
}

impl<'a> fmt::Display for RuleDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.rule.lhs.display(self.interner),
            self.rule.rhs.display(self.interner)
        )
    }
}
