//! Knuth-Bendix completion
//!
//! Turns a set of equations into a convergent rewrite system, or reports
//! why it cannot. The loop keeps three collections: pending equations,
//! freshly oriented rules whose critical pairs are still outstanding, and
//! stable rules. After every step the rule set is inter-reduced: no rule's
//! left-hand side is reducible by another rule, and every right-hand side is
//! in normal form with respect to the whole set.

use crate::config::{Budget, BudgetExhausted, CompletionConfig};
use crate::critical_pairs::critical_pairs_between;
use crate::interner::Interner;
use crate::ordering::{Ordering, Rpo};
use crate::rewrite::{normalize, reducible};
use crate::rule::{Equation, Rule, RuleError};
use crate::term::Term;
use std::collections::VecDeque;
use std::slice;
use thiserror::Error;

/// Why completion did not produce a convergent system
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// Neither side of the (normalized) equation dominates the other under
    /// the supplied ordering; retry with another precedence or status map
    #[error("equation cannot be oriented: {left} = {right}")]
    Unorientable { left: Term, right: Term },
    /// Step budget ran out
    #[error("step budget exhausted")]
    StepLimit,
    /// Wall-clock budget ran out
    #[error("time budget exhausted")]
    Timeout,
    /// An oriented equation produced an ill-formed rule; this indicates
    /// broken input rather than a failed search
    #[error(transparent)]
    MalformedRule(#[from] RuleError),
}

impl From<BudgetExhausted> for CompletionError {
    fn from(err: BudgetExhausted) -> Self {
        match err {
            BudgetExhausted::Steps => CompletionError::StepLimit,
            BudgetExhausted::Time => CompletionError::Timeout,
        }
    }
}

/// Run completion on `equations` under the reduction ordering `rpo`.
///
/// On success the returned rules are terminating (every rule is oriented by
/// `rpo`), confluent (no unresolved critical pair remains), and
/// inter-reduced. The interner supplies fresh variables for renaming rules
/// apart; on error all intermediate state is discarded.
pub fn complete(
    equations: Vec<Equation>,
    rpo: &Rpo,
    config: &CompletionConfig,
    interner: &mut Interner,
) -> Result<Vec<Rule>, CompletionError> {
    let mut budget = Budget::new(config);
    let mut pending: VecDeque<Equation> = equations.into();
    // Rules oriented but not yet overlapped (S) and fully processed rules (R)
    let mut fresh: Vec<Rule> = Vec::new();
    let mut stable: Vec<Rule> = Vec::new();

    loop {
        // Drain the pending equations, orienting each into a rule
        while let Some(eq) = pending.pop_front() {
            budget.charge()?;
            let all: Vec<Rule> = fresh.iter().chain(stable.iter()).cloned().collect();
            let s = normalize(&all, &eq.left, &mut budget)?;
            let t = normalize(&all, &eq.right, &mut budget)?;
            if s == t {
                continue;
            }
            let rule = match rpo.compare(&s, &t) {
                Ordering::Greater => Rule::new(s, t)?,
                Ordering::Less => Rule::new(t, s)?,
                Ordering::Equal | Ordering::Incomparable => {
                    return Err(CompletionError::Unorientable { left: s, right: t });
                }
            };
            log::debug!("oriented {}", rule);
            add_rule(rule, &mut pending, &mut fresh, &mut stable, &mut budget)?;
        }

        if fresh.is_empty() {
            log::debug!("completion finished with {} rules", stable.len());
            return Ok(stable);
        }

        // Process the smallest fresh rule next; small rules produce small
        // critical pairs, which keeps the search fair
        let next = fresh
            .iter()
            .enumerate()
            .min_by_key(|(i, rule)| (rule.size(), *i))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let rho = fresh.remove(next);

        let rho_ref = slice::from_ref(&rho);
        let mut pairs = critical_pairs_between(rho_ref, &stable, interner, &mut budget)?;
        pairs.extend(critical_pairs_between(&stable, rho_ref, interner, &mut budget)?);
        pairs.extend(critical_pairs_between(rho_ref, rho_ref, interner, &mut budget)?);
        log::debug!("{} critical pairs from {}", pairs.len(), rho);

        pending.extend(pairs);
        stable.push(rho);
    }
}

/// Install `rho` while restoring the inter-reduction invariant: rules whose
/// left-hand side `rho` rewrites are demoted back to equations, and the
/// right-hand sides of the survivors are renormalized against the full
/// updated rule set.
fn add_rule(
    rho: Rule,
    pending: &mut VecDeque<Equation>,
    fresh: &mut Vec<Rule>,
    stable: &mut Vec<Rule>,
    budget: &mut Budget,
) -> Result<(), CompletionError> {
    let mut demoted = Vec::new();
    demote_reduced(fresh, &rho, &mut demoted);
    demote_reduced(stable, &rho, &mut demoted);

    let full: Vec<Rule> = fresh
        .iter()
        .chain(stable.iter())
        .cloned()
        .chain(std::iter::once(rho.clone()))
        .collect();

    renormalize_rhs(fresh, &full, budget)?;
    renormalize_rhs(stable, &full, budget)?;

    for old in demoted {
        let left = normalize(&full, old.lhs(), budget)?;
        let right = normalize(&full, old.rhs(), budget)?;
        pending.push_back(Equation::new(left, right));
    }

    fresh.push(rho);
    Ok(())
}

/// Move every rule whose left-hand side `rho` can rewrite out of `rules`
fn demote_reduced(rules: &mut Vec<Rule>, rho: &Rule, demoted: &mut Vec<Rule>) {
    let mut kept = Vec::with_capacity(rules.len());
    for rule in rules.drain(..) {
        if reducible(slice::from_ref(rho), rule.lhs()) {
            log::debug!("demoted {}", rule);
            demoted.push(rule);
        } else {
            kept.push(rule);
        }
    }
    *rules = kept;
}

/// Normalize the right-hand side of every rule against `full`
fn renormalize_rhs(
    rules: &mut [Rule],
    full: &[Rule],
    budget: &mut Budget,
) -> Result<(), CompletionError> {
    for rule in rules.iter_mut() {
        let rhs = normalize(full, rule.rhs(), budget)?;
        if &rhs != rule.rhs() {
            *rule = Rule::new(rule.lhs().clone(), rhs)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::RpoConfig;
    use crate::term::{FunctionSymbol, Variable};

    struct TestContext {
        interner: Interner,
    }

    impl TestContext {
        fn new() -> Self {
            TestContext {
                interner: Interner::new(),
            }
        }

        fn var(&mut self, name: &str) -> Term {
            let id = self.interner.intern_variable(name);
            Term::Variable(Variable::new(id))
        }

        fn func(&mut self, name: &str, args: Vec<Term>) -> Term {
            let id = self.interner.intern_function(name);
            Term::Function(FunctionSymbol::new(id), args)
        }

        fn cst(&mut self, name: &str) -> Term {
            self.func(name, vec![])
        }

        fn rpo(&mut self, ascending: &[&str]) -> Rpo {
            let precedence = ascending
                .iter()
                .map(|name| self.interner.intern_function(name))
                .collect();
            Rpo::new(RpoConfig::new(precedence))
        }
    }

    #[test]
    fn test_single_oriented_equation() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let fx = ctx.func("f", vec![x.clone()]);
        let equations = vec![Equation::new(fx.clone(), x.clone())];
        let rpo = ctx.rpo(&["f"]);

        let rules = complete(
            equations,
            &rpo,
            &CompletionConfig::default(),
            &mut ctx.interner,
        )
        .unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0], Rule::new(fx, x).unwrap());
    }

    #[test]
    fn test_trivial_equation_is_dropped() {
        let mut ctx = TestContext::new();
        let a = ctx.cst("a");
        let equations = vec![Equation::new(a.clone(), a)];
        let rpo = ctx.rpo(&["a"]);

        let rules = complete(
            equations,
            &rpo,
            &CompletionConfig::default(),
            &mut ctx.interner,
        )
        .unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_unorientable_commutativity() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let y = ctx.var("Y");
        let fxy = ctx.func("f", vec![x.clone(), y.clone()]);
        let fyx = ctx.func("f", vec![y, x]);
        let equations = vec![Equation::new(fxy, fyx)];
        let rpo = ctx.rpo(&["f"]);

        let result = complete(
            equations,
            &rpo,
            &CompletionConfig::default(),
            &mut ctx.interner,
        );
        assert!(matches!(
            result,
            Err(CompletionError::Unorientable { .. })
        ));
    }

    #[test]
    fn test_competing_rules_resolve_via_critical_pair() {
        // f(f(X)) = a and f(f(X)) = b force a = b; with b < a the system
        // settles on rewriting a to b
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let ffx = {
            let fx = ctx.func("f", vec![x]);
            ctx.func("f", vec![fx])
        };
        let a = ctx.cst("a");
        let b = ctx.cst("b");
        let equations = vec![
            Equation::new(ffx.clone(), a.clone()),
            Equation::new(ffx, b.clone()),
        ];
        let rpo = ctx.rpo(&["b", "a", "f"]);

        let rules = complete(
            equations,
            &rpo,
            &CompletionConfig::default(),
            &mut ctx.interner,
        )
        .unwrap();

        let nf_a = crate::rewrite::normal_form(&rules, &a);
        let nf_b = crate::rewrite::normal_form(&rules, &b);
        assert_eq!(nf_a, nf_b);
        assert!(rules.contains(&Rule::new(a, b).unwrap()));
    }

    #[test]
    fn test_step_budget_is_enforced() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let fx = ctx.func("f", vec![x.clone()]);
        let equations = vec![Equation::new(fx, x)];
        let rpo = ctx.rpo(&["f"]);
        let config = CompletionConfig {
            max_steps: 1,
            ..Default::default()
        };

        let result = complete(equations, &rpo, &config, &mut ctx.interner);
        assert_eq!(result, Err(CompletionError::StepLimit));
    }

    #[test]
    fn test_timeout_is_enforced() {
        let mut ctx = TestContext::new();
        let x = ctx.var("X");
        let fx = ctx.func("f", vec![x.clone()]);
        let equations = vec![Equation::new(fx, x)];
        let rpo = ctx.rpo(&["f"]);
        let config = CompletionConfig {
            max_steps: 0,
            timeout: std::time::Duration::ZERO,
        };

        let result = complete(equations, &rpo, &config, &mut ctx.interner);
        assert_eq!(result, Err(CompletionError::Timeout));
    }
}
