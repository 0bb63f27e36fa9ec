//! Common types used throughout the transpiler
//!
//! This module defines the data model shared by both translation passes:
//! numeric kinds, variable and function records, the capacity-bounded
//! symbol tables, and the translation context that owns them all.

use crate::error::ErrorReporter;
use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two numeric kinds of ML
///
/// Every ML value is one of these; the kind of a variable is inferred
/// from the shape of its first bound expression and frozen afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Integer,
    Real,
}

impl Kind {
    /// The C type this kind translates to
    pub fn c_type(&self) -> &'static str {
        match self {
            Kind::Integer => "int",
            Kind::Real => "double",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.c_type())
    }
}

/// A variable with its inferred kind
///
/// The kind is set once, at first binding, and never changes; rebinding
/// with a different literal shape is a reported type mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub kind: Kind,
}

impl Variable {
    pub fn new(name: String, kind: Kind) -> Self {
        Self { name, kind }
    }
}

/// A function parameter; the kind stays unset until the signature resolves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub kind: Option<Kind>,
}

impl Parameter {
    pub fn new(name: String) -> Self {
        Self { name, kind: None }
    }

    /// The kind used for emission: resolved kind, or real by default
    pub fn effective_kind(&self) -> Kind {
        self.kind.unwrap_or(Kind::Real)
    }
}

/// Two-phase signature state of a function
///
/// Every function starts `Unresolved`; the first call site observed
/// anywhere in the program fixes the parameter and return kinds, after
/// which the signature never changes again. A function still unresolved
/// when its prototype is emitted defaults every kind to real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureState {
    Unresolved,
    Resolved,
}

/// A function definition collected during pass 1
///
/// Owned exclusively by the function table; created when the header line
/// is parsed, mutated once when the signature resolves, never destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_kind: Option<Kind>,
    pub state: SignatureState,
    /// Translated C text of the body, accumulated during pass 1
    pub body: String,
    pub has_return: bool,
}

impl FunctionDef {
    pub fn new(name: String, parameter_names: Vec<String>) -> Self {
        Self {
            name,
            parameters: parameter_names.into_iter().map(Parameter::new).collect(),
            return_kind: None,
            state: SignatureState::Unresolved,
            body: String::new(),
            has_return: false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.state == SignatureState::Resolved
    }

    /// The return kind used for emission: resolved kind, or real by default
    pub fn effective_return_kind(&self) -> Kind {
        self.return_kind.unwrap_or(Kind::Real)
    }
}

/// Function table, insertion-ordered and capacity-bounded
#[derive(Debug, Clone, Serialize)]
pub struct FunctionTable {
    entries: Vec<FunctionDef>,
    #[serde(skip)]
    limit: usize,
}

impl FunctionTable {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    pub fn insert(&mut self, function: FunctionDef) {
        debug_assert!(!self.is_full());
        self.entries.push(function);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.entries.iter().find(|f| f.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FunctionDef> {
        self.entries.iter_mut().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionDef> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FunctionDef> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Variable table, insertion-ordered and capacity-bounded
///
/// One instance holds the globals collected in pass 1; a second instance
/// holds the main routine's locals and is reset before pass 2 generates
/// the main routine.
#[derive(Debug, Clone, Serialize)]
pub struct VariableTable {
    entries: Vec<Variable>,
    #[serde(skip)]
    limit: usize,
}

impl VariableTable {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    pub fn insert(&mut self, variable: Variable) {
        debug_assert!(!self.is_full());
        self.entries.push(variable);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.entries.iter().find(|v| v.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Capacity limits for a translation run
///
/// The original fixed-size bounds of the language, surfaced as explicit
/// configuration instead of storage constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub max_functions: usize,
    pub max_global_variables: usize,
    pub max_local_variables: usize,
    pub max_identifier_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_functions: 50,
            max_global_variables: 50,
            max_local_variables: 50,
            max_identifier_length: 12,
        }
    }
}

/// The compilation context threaded through both passes
///
/// Created once per translation run, written by pass 1 (symbol
/// collection) and read/written by pass 2 (code generation), then
/// discarded. Single-writer, never shared across threads.
#[derive(Debug, Clone)]
pub struct TranslationContext {
    pub filename: String,
    pub limits: Limits,
    pub functions: FunctionTable,
    pub globals: VariableTable,
    pub locals: VariableTable,
    pub reporter: ErrorReporter,
}

impl TranslationContext {
    pub fn new(filename: &str, limits: Limits) -> Self {
        Self {
            filename: filename.to_string(),
            limits,
            functions: FunctionTable::new(limits.max_functions),
            globals: VariableTable::new(limits.max_global_variables),
            locals: VariableTable::new(limits.max_local_variables),
            reporter: ErrorReporter::new(),
        }
    }

    /// Location of the given 1-based source line in this run's file
    pub fn location(&self, line: u32) -> SourceLocation {
        SourceLocation::new(&self.filename, line)
    }

    /// Look up a bound variable, globals first, then locals
    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.globals.get(name).or_else(|| self.locals.get(name))
    }
}
