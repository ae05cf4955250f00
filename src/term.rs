//! First-order terms with logical variables
//!
//! A term is a variable or an application of a function symbol to an ordered
//! list of argument terms. Constants are nullary applications; arity is
//! whatever the occurrence says it is. Terms are immutable values with
//! structural equality, and variable identity is the interned id, never the
//! name.

use crate::interner::{FunctionId, Interner, VariableId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A logical variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
}

impl Variable {
    /// Create a new variable from an ID
    pub fn new(id: VariableId) -> Self {
        Variable { id }
    }

    /// Get the name of this variable from the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_variable(self.id)
    }
}

/// A function symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub id: FunctionId,
}

impl FunctionSymbol {
    /// Create a new function symbol from an ID
    pub fn new(id: FunctionId) -> Self {
        FunctionSymbol { id }
    }

    /// Get the name of this function symbol from the interner
    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_function(self.id)
    }
}

/// A first-order term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Get all variable IDs in this term, in traversal order, with repeats
    pub fn variable_ids(&self) -> Vec<VariableId> {
        match self {
            Term::Variable(v) => vec![v.id],
            Term::Function(_, args) => args.iter().flat_map(|arg| arg.variable_ids()).collect(),
        }
    }

    /// Collect all variable IDs in this term into a set
    pub fn collect_variable_ids(&self, vars: &mut HashSet<VariableId>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.id);
            }
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variable_ids(vars);
                }
            }
        }
    }

    /// Check whether the given variable occurs anywhere in this term
    pub fn contains_variable(&self, id: VariableId) -> bool {
        match self {
            Term::Variable(v) => v.id == id,
            Term::Function(_, args) => args.iter().any(|arg| arg.contains_variable(id)),
        }
    }

    /// Total number of nodes in the term
    pub fn size(&self) -> usize {
        match self {
            Term::Variable(_) => 1,
            Term::Function(_, args) => 1 + args.iter().map(|arg| arg.size()).sum::<usize>(),
        }
    }

    /// Copy this term with every variable replaced by a freshly allocated
    /// one. Shared occurrences stay shared: the same old variable maps to
    /// the same fresh variable throughout.
    pub fn fresh_rename(&self, interner: &mut Interner) -> Term {
        let mut map = HashMap::new();
        self.fresh_rename_with(&mut map, interner)
    }

    pub(crate) fn fresh_rename_with(
        &self,
        map: &mut HashMap<VariableId, VariableId>,
        interner: &mut Interner,
    ) -> Term {
        match self {
            Term::Variable(v) => {
                let fresh = *map.entry(v.id).or_insert_with(|| interner.fresh_variable());
                Term::Variable(Variable::new(fresh))
            }
            Term::Function(f, args) => Term::Function(
                *f,
                args.iter()
                    .map(|arg| arg.fresh_rename_with(map, interner))
                    .collect(),
            ),
        }
    }

    /// Format this term with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> TermDisplay<'a> {
        TermDisplay {
            term: self,
            interner,
        }
    }
}

/// Display wrapper for Term that includes an interner for name resolution
pub struct TermDisplay<'a> {
    term: &'a Term,
    interner: &'a Interner,
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.term {
            Term::Variable(v) => write!(f, "{}", self.interner.resolve_variable(v.id)),
            Term::Function(func, args) => {
                write!(f, "{}", self.interner.resolve_function(func.id))?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg.display(self.interner))?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

// Display implementations that show IDs (for debugging without interner)

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.id.as_u32())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Function(func, args) => {
                write!(f, "F{}(", func.id.as_u32())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
