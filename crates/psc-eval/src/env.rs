//! Scoped variable environment and native function table.

use std::collections::BTreeMap;

use psc_value::Value;

use crate::error::{EvalError, EvalResult};
use crate::runtime::Runtime;

/// A host function callable from PSC code.
pub type NativeFn = fn(&[Value]) -> EvalResult<Value>;

/// A single scope level.
#[derive(Debug, Clone, Default)]
struct Scope {
    bindings: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy)]
struct Native {
    arity: usize,
    call: NativeFn,
}

/// Scoped variable environment with push/pop semantics.
///
/// Variables are looked up from innermost scope outward.
/// `define` always creates in the current (innermost) scope.
/// `set` updates the first scope where the variable exists.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
    natives: BTreeMap<String, Native>,
}

impl Environment {
    /// Create a new environment with one global scope and no functions.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            natives: BTreeMap::new(),
        }
    }

    /// Push a new scope (for function bodies, loop bodies, etc.).
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pop the innermost scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of live scopes, the global one included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Define a variable in the current (innermost) scope.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.bindings.insert(name.to_string(), value);
        }
    }

    /// Look up a variable, searching from innermost to outermost scope.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.bindings.get(name))
    }

    /// Update a variable in the first scope where it exists.
    /// Returns `true` if found and updated, `false` if not found.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.bindings.get_mut(name))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Register a native function. A later registration under the same name
    /// replaces the earlier one.
    pub fn register(&mut self, name: &str, arity: usize, call: NativeFn) {
        tracing::debug!(name, arity, "registered native function");
        self.natives.insert(name.to_string(), Native { arity, call });
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime for Environment {
    fn get_value(&self, name: &str) -> EvalResult<Value> {
        self.get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    fn set_value(&mut self, name: &str, value: Value) -> EvalResult<()> {
        if !self.set(name, value.clone()) {
            self.define(name, value);
        }
        Ok(())
    }

    fn invoke(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let native = self
            .natives
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UndefinedFunction(name.to_string()))?;
        if args.len() != native.arity {
            return Err(EvalError::ArityMismatch {
                name: name.to_string(),
                expected: native.arity,
                found: args.len(),
            });
        }
        tracing::trace!(name, args = args.len(), "invoking native function");
        (native.call)(&args)
    }
}
