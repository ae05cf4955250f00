//! One-way matching (subsumption)

use super::mgu::UnificationError;
use super::substitution::Substitution;
use crate::term::Term;

/// One-way match: find a substitution σ with σ(pattern) = term.
///
/// Only variables in the pattern are instantiated; variables in the target
/// are treated as opaque constants.
pub fn match_term(pattern: &Term, term: &Term) -> Result<Substitution, UnificationError> {
    let mut subst = Substitution::new();
    match_with_subst(pattern, term, &mut subst)?;
    Ok(subst)
}

fn match_with_subst(
    pattern: &Term,
    term: &Term,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    match (pattern, term) {
        // Variable in pattern matches anything, but a repeated variable must
        // keep matching the same subterm
        (Term::Variable(v), t) => {
            if let Some(bound) = subst.get(v.id) {
                if bound == t {
                    Ok(())
                } else {
                    Err(UnificationError::BindingMismatch(*v))
                }
            } else {
                subst.insert(*v, t.clone());
                Ok(())
            }
        }
        // Applications must agree on symbol and arity
        (Term::Function(f1, args1), Term::Function(f2, args2)) => {
            if f1.id != f2.id {
                return Err(UnificationError::FunctionClash(f1.id, f2.id));
            }
            if args1.len() != args2.len() {
                return Err(UnificationError::ArityMismatch(args1.len(), args2.len()));
            }
            for (arg1, arg2) in args1.iter().zip(args2.iter()) {
                match_with_subst(arg1, arg2, subst)?;
            }
            Ok(())
        }
        // Target variables never match a non-variable pattern
        (Term::Function(_, _), Term::Variable(v)) => Err(UnificationError::VariableTarget(*v)),
    }
}
