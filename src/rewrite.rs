//! Matching-based rewriting: root steps and innermost normal forms

use crate::config::{Budget, BudgetExhausted};
use crate::rule::Rule;
use crate::term::Term;
use crate::unification::match_term;

/// Try to rewrite `term` at the root, taking the first rule (in list order)
/// whose left-hand side matches. Returns the instantiated right-hand side,
/// or `None` when the term is irreducible at the root.
///
/// One-sided matching never lets a rule variable escape into the result
/// except through the instantiated right-hand side, so the stored rule is
/// matched directly. The rule list order is part of the semantics: do not
/// reorder it between calls belonging to one normalization.
pub fn rewrite_root(rules: &[Rule], term: &Term) -> Option<Term> {
    for rule in rules {
        if let Ok(binding) = match_term(rule.lhs(), term) {
            return Some(rule.rhs().apply_substitution(&binding));
        }
    }
    None
}

/// Reduce `term` to a normal form by the innermost strategy: normalize every
/// argument, then rewrite at the root and start over on the result.
/// Variables are their own normal forms.
///
/// Termination is guaranteed when the rules were produced by completion
/// under a reduction ordering; for arbitrary rules this may not return, and
/// bounding it is the caller's concern.
pub fn normal_form(rules: &[Rule], term: &Term) -> Term {
    match term {
        Term::Variable(_) => term.clone(),
        Term::Function(f, args) => {
            let reduced = Term::Function(
                *f,
                args.iter().map(|arg| normal_form(rules, arg)).collect(),
            );
            match rewrite_root(rules, &reduced) {
                Some(next) => normal_form(rules, &next),
                None => reduced,
            }
        }
    }
}

/// Budgeted form of [`normal_form`], used inside completion: one budget step
/// per root-rewrite attempt.
pub(crate) fn normalize(
    rules: &[Rule],
    term: &Term,
    budget: &mut Budget,
) -> Result<Term, BudgetExhausted> {
    match term {
        Term::Variable(_) => Ok(term.clone()),
        Term::Function(f, args) => {
            let mut reduced_args = Vec::with_capacity(args.len());
            for arg in args {
                reduced_args.push(normalize(rules, arg, budget)?);
            }
            let reduced = Term::Function(*f, reduced_args);
            budget.charge()?;
            match rewrite_root(rules, &reduced) {
                Some(next) => normalize(rules, &next, budget),
                None => Ok(reduced),
            }
        }
    }
}

/// True if any rule applies anywhere in the term
pub(crate) fn reducible(rules: &[Rule], term: &Term) -> bool {
    match term {
        Term::Variable(_) => false,
        Term::Function(_, args) => {
            rules
                .iter()
                .any(|rule| match_term(rule.lhs(), term).is_ok())
                || args.iter().any(|arg| reducible(rules, arg))
        }
    }
}
