//! Property-based tests for unification, matching, and substitution.

use super::{match_term, unify, Substitution};
use crate::interner::Interner;
use crate::term::{FunctionSymbol, Term, Variable};
use proptest::prelude::*;
use std::collections::HashSet;

/// Term description (before interning)
#[derive(Debug, Clone)]
enum TermDesc {
    Var(u8),                 // Variable index 0-3
    Const(u8),               // Nullary function index 0-3
    Func(u8, Vec<TermDesc>), // Function index 0-1, with args
}

fn arb_term_desc(max_depth: u32) -> BoxedStrategy<TermDesc> {
    if max_depth == 0 {
        prop_oneof![
            (0..4u8).prop_map(TermDesc::Var),
            (0..4u8).prop_map(TermDesc::Const),
        ]
        .boxed()
    } else {
        prop_oneof![
            3 => (0..4u8).prop_map(TermDesc::Var),
            3 => (0..4u8).prop_map(TermDesc::Const),
            2 => (0..2u8, proptest::collection::vec(arb_term_desc(max_depth - 1), 1..=2))
                .prop_map(|(f, args)| TermDesc::Func(f, args)),
        ]
        .boxed()
    }
}

fn build_term(desc: &TermDesc, interner: &mut Interner) -> Term {
    match desc {
        TermDesc::Var(i) => {
            let id = interner.intern_variable(&format!("X{}", i));
            Term::Variable(Variable::new(id))
        }
        TermDesc::Const(i) => {
            let id = interner.intern_function(&format!("c{}", i));
            Term::Function(FunctionSymbol::new(id), vec![])
        }
        TermDesc::Func(f, args) => {
            let id = interner.intern_function(&format!("f{}", f));
            let built: Vec<Term> = args.iter().map(|a| build_term(a, interner)).collect();
            Term::Function(FunctionSymbol::new(id), built)
        }
    }
}

/// Generate a single term with its interner
fn arb_term(max_depth: u32) -> impl Strategy<Value = (Term, Interner)> {
    arb_term_desc(max_depth).prop_map(|desc| {
        let mut interner = Interner::new();
        let term = build_term(&desc, &mut interner);
        (term, interner)
    })
}

/// Generate a pair of terms sharing the same interner
fn arb_term_pair(max_depth: u32) -> impl Strategy<Value = (Term, Term, Interner)> {
    (arb_term_desc(max_depth), arb_term_desc(max_depth)).prop_map(|(d1, d2)| {
        let mut interner = Interner::new();
        let t1 = build_term(&d1, &mut interner);
        let t2 = build_term(&d2, &mut interner);
        (t1, t2, interner)
    })
}

// =========================================================================
// Unification properties
// =========================================================================

proptest! {
    /// Soundness: if unify(s, t) = σ, then sσ = tσ
    #[test]
    fn unification_soundness((t1, t2, _interner) in arb_term_pair(3)) {
        if let Ok(sigma) = unify(&t1, &t2) {
            let t1_sigma = t1.apply_substitution(&sigma);
            let t2_sigma = t2.apply_substitution(&sigma);
            prop_assert_eq!(t1_sigma, t2_sigma, "unifier must make terms equal");
        }
        // If unification fails there is no property to check
    }

    /// Symmetry: unify(s, t) succeeds iff unify(t, s) succeeds
    #[test]
    fn unification_symmetry((t1, t2, _interner) in arb_term_pair(3)) {
        let r1 = unify(&t1, &t2);
        let r2 = unify(&t2, &t1);
        prop_assert_eq!(r1.is_ok(), r2.is_ok(), "unification should be symmetric");
    }

    /// Occurs check: unify(X, f(...X...)) always fails
    #[test]
    fn unification_occurs_check(func_idx in 0..2u8, depth in 1..3u32) {
        let mut interner = Interner::new();
        let x_id = interner.intern_variable("X");
        let x = Term::Variable(Variable::new(x_id));

        let f_id = interner.intern_function(&format!("f{}", func_idx));
        let mut term = x.clone();
        for _ in 0..depth {
            term = Term::Function(FunctionSymbol::new(f_id), vec![term]);
        }

        prop_assert!(unify(&x, &term).is_err(), "occurs check should prevent X = f(...X...)");
    }

    /// Identity: unify(t, t) succeeds and the unifier does not change t
    #[test]
    fn unification_identity((t, _interner) in arb_term(3)) {
        let result = unify(&t, &t);
        prop_assert!(result.is_ok(), "term should unify with itself");
        if let Ok(sigma) = result {
            let t_sigma = t.apply_substitution(&sigma);
            prop_assert_eq!(t, t_sigma, "unifying a term with itself should not change it");
        }
    }
}

// =========================================================================
// Matching properties
// =========================================================================

proptest! {
    /// Soundness: if match(pattern, target) = σ, then pattern·σ = target
    #[test]
    fn matching_soundness((t1, t2, _interner) in arb_term_pair(3)) {
        if let Ok(sigma) = match_term(&t1, &t2) {
            let t1_sigma = t1.apply_substitution(&sigma);
            prop_assert_eq!(t1_sigma, t2, "matching substitution must make pattern equal to target");
        }
    }

    /// A match instantiates only the pattern's variables
    #[test]
    fn matching_domain_containment((t1, t2, _interner) in arb_term_pair(3)) {
        if let Ok(sigma) = match_term(&t1, &t2) {
            let mut pattern_vars = HashSet::new();
            t1.collect_variable_ids(&mut pattern_vars);
            for bound in sigma.map.keys() {
                prop_assert!(pattern_vars.contains(bound), "match bound a non-pattern variable");
            }
        }
    }

    /// Matching is not symmetric: variables match constants, not vice versa
    #[test]
    fn matching_asymmetry_constant_vs_variable(const_idx in 0..4u8) {
        let mut interner = Interner::new();
        let x_id = interner.intern_variable("X");
        let x = Term::Variable(Variable::new(x_id));
        let c_id = interner.intern_function(&format!("c{}", const_idx));
        let c = Term::Function(FunctionSymbol::new(c_id), vec![]);

        prop_assert!(match_term(&x, &c).is_ok(), "variable pattern should match constant");
        prop_assert!(match_term(&c, &x).is_err(), "constant pattern should not match variable");
    }
}

// =========================================================================
// Substitution properties
// =========================================================================

proptest! {
    /// Empty substitution is identity
    #[test]
    fn substitution_identity((t, _interner) in arb_term(3)) {
        let empty = Substitution::new();
        let t_applied = t.apply_substitution(&empty);
        prop_assert_eq!(t, t_applied, "empty substitution should be identity");
    }

    /// Variables of σ(t) are contained in the range variables of σ plus the
    /// variables of t outside the domain of σ
    #[test]
    fn substitution_variable_range(
        (t, bindings) in arb_term_desc(3).prop_flat_map(|desc| {
            let binding_descs = proptest::collection::vec((0..4u8, arb_term_desc(2)), 0..3);
            (Just(desc), binding_descs)
        })
    ) {
        let mut interner = Interner::new();
        let term = build_term(&t, &mut interner);
        let mut sigma = Substitution::new();
        for (var_idx, desc) in &bindings {
            let id = interner.intern_variable(&format!("X{}", var_idx));
            let bound = build_term(desc, &mut interner);
            sigma.insert_id(id, bound);
        }

        let mut range_vars = HashSet::new();
        for bound in sigma.map.values() {
            bound.collect_variable_ids(&mut range_vars);
        }
        let mut term_vars = HashSet::new();
        term.collect_variable_ids(&mut term_vars);

        let mut result_vars = HashSet::new();
        term.apply_substitution(&sigma).collect_variable_ids(&mut result_vars);

        for v in result_vars {
            let passed_through = term_vars.contains(&v) && !sigma.contains(v);
            prop_assert!(
                range_vars.contains(&v) || passed_through,
                "substitution introduced a variable from nowhere"
            );
        }
    }
}
