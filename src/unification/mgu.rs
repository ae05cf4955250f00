//! Most General Unifier (MGU) computation

use super::substitution::Substitution;
use crate::interner::FunctionId;
use crate::term::{Term, Variable};

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Why two terms failed to unify (or a pattern failed to match).
///
/// These are ordinary non-error outcomes of the search, not fatal
/// conditions; callers usually only care that unification failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    /// Occurs check failed - variable occurs in term
    OccursCheck(Variable, Term),
    /// Function symbols don't match
    FunctionClash(FunctionId, FunctionId),
    /// Arities don't match
    ArityMismatch(usize, usize),
    /// A pattern variable was already bound to a different term (matching only)
    BindingMismatch(Variable),
    /// A non-variable pattern met a variable target (matching only)
    VariableTarget(Variable),
}

/// Unify two terms, returning a most general unifier (MGU) if one exists.
/// The occurs check is always on.
pub fn unify(term1: &Term, term2: &Term) -> UnificationResult {
    let mut subst = Substitution::new();
    unify_with_subst(term1, term2, &mut subst)?;
    Ok(subst)
}

/// Unify two terms under an existing substitution
fn unify_with_subst(
    term1: &Term,
    term2: &Term,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    let t1 = term1.apply_substitution(subst);
    let t2 = term2.apply_substitution(subst);

    match (&t1, &t2) {
        // Same term - nothing to do
        _ if t1 == t2 => Ok(()),

        // Variable cases
        (Term::Variable(v), t) | (t, Term::Variable(v)) => {
            if occurs_check(v, t) {
                Err(UnificationError::OccursCheck(*v, t.clone()))
            } else {
                // Normalized insert keeps all bindings fully substituted
                subst.insert_normalized(*v, t.clone());
                Ok(())
            }
        }

        // Function terms
        (Term::Function(f1, args1), Term::Function(f2, args2)) => {
            if f1.id != f2.id {
                return Err(UnificationError::FunctionClash(f1.id, f2.id));
            }
            if args1.len() != args2.len() {
                return Err(UnificationError::ArityMismatch(args1.len(), args2.len()));
            }

            // Unify arguments pairwise
            for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                unify_with_subst(arg1, arg2, subst)?;
            }
            Ok(())
        }
    }
}

/// Check if variable occurs in term (occurs check)
fn occurs_check(var: &Variable, term: &Term) -> bool {
    term.contains_variable(var.id)
}
