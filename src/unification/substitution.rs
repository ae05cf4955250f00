//! Variable substitutions

use crate::interner::VariableId;
use crate::term::{Term, Variable};
use std::collections::HashMap;

/// A substitution mapping variable IDs to terms
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    pub map: HashMap<VariableId, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: HashMap::new(),
        }
    }

    /// Add a variable -> term mapping
    pub fn insert(&mut self, var: Variable, term: Term) {
        self.map.insert(var.id, term);
    }

    /// Add a variable ID -> term mapping
    pub fn insert_id(&mut self, var_id: VariableId, term: Term) {
        self.map.insert(var_id, term);
    }

    /// Add a variable -> term mapping with eager substitution propagation.
    /// Keeps every binding fully substituted, so applying the substitution
    /// once suffices.
    pub fn insert_normalized(&mut self, var: Variable, term: Term) {
        let var_id = var.id;

        // First, apply existing substitutions to the new term
        let normalized_term = term.apply_substitution(self);
        self.map.insert(var_id, normalized_term.clone());

        // Now fold the new binding into all existing mappings
        let single = Substitution {
            map: HashMap::from([(var_id, normalized_term)]),
        };
        let mut updated = HashMap::with_capacity(self.map.len());
        for (&existing_id, existing_term) in self.map.iter() {
            if existing_id != var_id {
                updated.insert(existing_id, existing_term.apply_substitution(&single));
            } else {
                updated.insert(existing_id, existing_term.clone());
            }
        }
        self.map = updated;
    }

    /// Get the term for a variable ID, if bound
    pub fn get(&self, var_id: VariableId) -> Option<&Term> {
        self.map.get(&var_id)
    }

    /// Check if a variable ID is bound
    pub fn contains(&self, var_id: VariableId) -> bool {
        self.map.contains_key(&var_id)
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True if no variable is bound
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Term {
    /// Apply a substitution to this term
    pub fn apply_substitution(&self, subst: &Substitution) -> Term {
        match self {
            Term::Variable(v) => subst.map.get(&v.id).cloned().unwrap_or_else(|| self.clone()),
            Term::Function(f, args) => {
                let new_args = args
                    .iter()
                    .map(|arg| arg.apply_substitution(subst))
                    .collect();
                Term::Function(*f, new_args)
            }
        }
    }
}
