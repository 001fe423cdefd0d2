//! Global tables and local parameter scopes

use super::error::{DeclKind, RuntimeError};
use crate::expression::Span;
use crate::program::FunctionDecl;
use crate::value::Bit;
use std::collections::HashMap;
use std::sync::Arc;

/// The global variable and function tables of one run
///
/// Both tables are append-only and write-once per name, and a name is never
/// in both at once.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: HashMap<Arc<str>, Bit>,
    functions: HashMap<Arc<str>, Arc<FunctionDecl>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(&self, name: &str) -> Option<Bit> {
        self.variables.get(name).copied()
    }

    pub fn function(&self, name: &str) -> Option<&Arc<FunctionDecl>> {
        self.functions.get(name)
    }

    /// What `name` is currently declared as, if anything
    pub fn lookup(&self, name: &str) -> Option<DeclKind> {
        if self.variables.contains_key(name) {
            Some(DeclKind::Variable)
        } else if self.functions.contains_key(name) {
            Some(DeclKind::Function)
        } else {
            None
        }
    }

    /// Fail if `name` is already taken by a variable or a function
    pub fn ensure_undeclared(&self, name: &Arc<str>, span: Span) -> Result<(), RuntimeError> {
        match self.lookup(name) {
            Some(existing) => Err(RuntimeError::AlreadyDeclared {
                name: Arc::clone(name),
                existing,
                span,
            }),
            None => Ok(()),
        }
    }

    pub fn declare_variable(
        &mut self,
        name: Arc<str>,
        value: Bit,
        span: Span,
    ) -> Result<(), RuntimeError> {
        self.ensure_undeclared(&name, span)?;
        self.variables.insert(name, value);
        Ok(())
    }

    /// Register a function after checking its name and parameter list
    pub fn declare_function(&mut self, decl: FunctionDecl) -> Result<(), RuntimeError> {
        self.ensure_undeclared(&decl.name, decl.span)?;
        for (i, param) in decl.params.iter().enumerate() {
            if decl.params[..i].contains(param) {
                return Err(RuntimeError::DuplicateParameter {
                    function: Arc::clone(&decl.name),
                    parameter: Arc::clone(param),
                    span: decl.span,
                });
            }
        }
        self.functions.insert(Arc::clone(&decl.name), Arc::new(decl));
        Ok(())
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_functions(&self) -> usize {
        self.functions.len()
    }
}

/// Parameter bindings of one function activation
///
/// Created per call from already-evaluated arguments and dropped when the
/// call returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalScope {
    bindings: HashMap<Arc<str>, Bit>,
}

impl LocalScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: Arc<str>, value: Bit) {
        self.bindings.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<Bit> {
        self.bindings.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(Arc<str>, Bit)> for LocalScope {
    fn from_iter<I: IntoIterator<Item = (Arc<str>, Bit)>>(iter: I) -> Self {
        LocalScope {
            bindings: iter.into_iter().collect(),
        }
    }
}
