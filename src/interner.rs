//! Symbol interning for efficient comparison and copy semantics
//!
//! Variables and function symbols are represented by `u32` ids interned in
//! per-kind string arenas. Ids are `Copy`, compare in O(1), and resolve back
//! to their names for display. The interner is also the allocator for fresh
//! variables, so renaming never depends on global state: pass the interner
//! through the computation that needs it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// ID for an interned variable name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) u32);

/// ID for an interned function symbol name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub(crate) u32);

impl VariableId {
    /// Get the raw ID value (for debugging/serialization)
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl FunctionId {
    /// Get the raw ID value (for debugging/serialization)
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Internal string arena for a single symbol kind
#[derive(Debug, Clone, Default)]
struct StringArena {
    /// Interned strings, indexed by ID
    strings: Vec<String>,
    /// Lookup table from string to ID
    lookup: HashMap<String, u32>,
}

impl StringArena {
    fn new() -> Self {
        StringArena {
            strings: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Intern a string, returning its ID (get-or-create)
    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = self.strings.len() as u32;
        self.strings.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    /// Resolve an ID to its string
    fn resolve(&self, id: u32) -> &str {
        &self.strings[id as usize]
    }

    /// Check if a string is already interned
    fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Get the ID for an already-interned string (returns None if not found)
    fn get(&self, name: &str) -> Option<u32> {
        self.lookup.get(name).copied()
    }

    /// Number of interned strings
    fn len(&self) -> usize {
        self.strings.len()
    }
}

/// Symbol interner for first-order terms
///
/// Stores variable and function names in separate arenas. Constants are
/// nullary function symbols, so they live in the function arena.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    variables: StringArena,
    functions: StringArena,
    /// Next candidate index for generated fresh-variable names
    fresh_counter: usize,
}

impl Interner {
    /// Create a new empty interner
    pub fn new() -> Self {
        Interner {
            variables: StringArena::new(),
            functions: StringArena::new(),
            fresh_counter: 0,
        }
    }

    // === Variable interning ===

    /// Intern a variable name, returning its ID (get-or-create)
    pub fn intern_variable(&mut self, name: &str) -> VariableId {
        VariableId(self.variables.intern(name))
    }

    /// Resolve a variable ID to its name
    pub fn resolve_variable(&self, id: VariableId) -> &str {
        self.variables.resolve(id.0)
    }

    /// Get the ID for an already-interned variable (returns None if not found)
    pub fn get_variable(&self, name: &str) -> Option<VariableId> {
        self.variables.get(name).map(VariableId)
    }

    /// Number of interned variables
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Allocate a variable that is distinct from every variable interned so
    /// far. Generated names have the form `_<n>`; names already taken by the
    /// caller are skipped.
    pub fn fresh_variable(&mut self) -> VariableId {
        loop {
            let name = format!("_{}", self.fresh_counter);
            self.fresh_counter += 1;
            if !self.variables.contains(&name) {
                return VariableId(self.variables.intern(&name));
            }
        }
    }

    // === Function interning ===

    /// Intern a function name, returning its ID (get-or-create)
    pub fn intern_function(&mut self, name: &str) -> FunctionId {
        FunctionId(self.functions.intern(name))
    }

    /// Resolve a function ID to its name
    pub fn resolve_function(&self, id: FunctionId) -> &str {
        self.functions.resolve(id.0)
    }

    /// Get the ID for an already-interned function (returns None if not found)
    pub fn get_function(&self, name: &str) -> Option<FunctionId> {
        self.functions.get(name).map(FunctionId)
    }

    /// Number of interned function symbols
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

// === Display implementations for debugging ===

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// === Serde implementations ===
// Ids serialize as bare u32 for compact storage.

impl Serialize for VariableId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VariableId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(VariableId)
    }
}

impl Serialize for FunctionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FunctionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(FunctionId)
    }
}
