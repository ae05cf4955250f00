//! Critical pair enumeration
//!
//! A critical pair arises where the left-hand side of one rule unifies with
//! a non-variable subterm of another rule's left-hand side: the overlapped
//! term then rewrites in two different ways, and the two results are emitted
//! as an equation for completion to reconcile.

use crate::config::{Budget, BudgetExhausted};
use crate::interner::Interner;
use crate::rule::{Equation, Rule};
use crate::term::{FunctionSymbol, Term};
use crate::unification::unify;

/// One level of surrounding context while descending into a left-hand side:
/// the head symbol plus the untouched siblings on each flank. Folding the
/// frame stack back outward rebuilds the whole term around a replacement.
struct ContextFrame<'a> {
    symbol: FunctionSymbol,
    left: &'a [Term],
    right: &'a [Term],
}

/// Wrap `replacement` in the recorded context, innermost frame first
fn rebuild(frames: &[ContextFrame<'_>], replacement: Term) -> Term {
    frames.iter().rev().fold(replacement, |acc, frame| {
        let mut args = Vec::with_capacity(frame.left.len() + frame.right.len() + 1);
        args.extend_from_slice(frame.left);
        args.push(acc);
        args.extend_from_slice(frame.right);
        Term::Function(frame.symbol, args)
    })
}

/// Walk the non-variable positions of the outer rule's left-hand side,
/// overlapping each against the inner rule's left-hand side.
fn overlaps_at<'a>(
    outer_rhs: &Term,
    subterm: &'a Term,
    inner: &Rule,
    frames: &mut Vec<ContextFrame<'a>>,
    pairs: &mut Vec<Equation>,
    budget: &mut Budget,
) -> Result<(), BudgetExhausted> {
    // Variable positions never overlap
    let (f, args) = match subterm {
        Term::Variable(_) => return Ok(()),
        Term::Function(f, args) => (f, args),
    };

    budget.charge()?;
    if let Ok(sigma) = unify(subterm, inner.lhs()) {
        let left = outer_rhs.apply_substitution(&sigma);
        let right = rebuild(frames, inner.rhs().clone()).apply_substitution(&sigma);
        pairs.push(Equation::new(left, right));
    }

    for (i, arg) in args.iter().enumerate() {
        frames.push(ContextFrame {
            symbol: *f,
            left: &args[..i],
            right: &args[i + 1..],
        });
        overlaps_at(outer_rhs, arg, inner, frames, pairs, budget)?;
        frames.pop();
    }
    Ok(())
}

/// All critical pairs between ordered rule pairs drawn from `outer` and
/// `inner`. Each pair of rules is renamed apart independently, so a rule
/// overlapping with itself uses two disjoint copies.
pub(crate) fn critical_pairs_between(
    outer: &[Rule],
    inner: &[Rule],
    interner: &mut Interner,
    budget: &mut Budget,
) -> Result<Vec<Equation>, BudgetExhausted> {
    let mut pairs = Vec::new();
    for outer_rule in outer {
        for inner_rule in inner {
            let outer_fresh = outer_rule.rename_apart(interner);
            let inner_fresh = inner_rule.rename_apart(interner);
            let mut frames = Vec::new();
            overlaps_at(
                outer_fresh.rhs(),
                outer_fresh.lhs(),
                &inner_fresh,
                &mut frames,
                &mut pairs,
                budget,
            )?;
        }
    }
    Ok(pairs)
}

/// Enumerate the critical pairs of a rule set: every ordered pair of rules,
/// including each rule against itself, at every non-variable position of the
/// outer left-hand side.
pub fn critical_pairs(rules: &[Rule], interner: &mut Interner) -> Vec<Equation> {
    let mut budget = Budget::unlimited();
    critical_pairs_between(rules, rules, interner, &mut budget)
        .expect("unlimited budget cannot be exhausted")
}
