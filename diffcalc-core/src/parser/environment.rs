//! Environment for variable bindings
//!
//! Maps case-sensitive variable names to values for a single evaluation.
//! `rebind` hands out a guard that temporarily overrides one name and puts
//! the previous state back when dropped.

use crate::parser::error::EvalError;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Variable storage for one evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: HashMap<String, f64>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Environment {
            vars: HashMap::new(),
        }
    }

    /// Bind a variable, overwriting any previous value
    pub fn define(&mut self, name: impl Into<String>, value: f64) {
        self.vars.insert(name.into(), value);
    }

    /// Alias for `define`
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.define(name, value);
    }

    /// Get a variable's value
    pub fn get(&self, name: &str) -> Result<f64, EvalError> {
        self.lookup(name).ok_or_else(|| EvalError::UndefinedVariable {
            name: name.to_string(),
        })
    }

    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied()
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.vars.remove(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Bound names in lexicographic order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.vars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Temporarily take over `name`.
    ///
    /// The returned guard remembers whether `name` was bound and to what.
    /// Dropping it restores that value, or removes the binding if there was
    /// none, on every exit path including early returns through `?`.
    pub fn rebind(&mut self, name: impl Into<String>) -> ScopedBinding<'_> {
        let name = name.into();
        let previous = self.lookup(&name);
        ScopedBinding {
            env: self,
            name,
            previous,
        }
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Environment {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (name, value) in iter {
            env.define(name, value);
        }
        env
    }
}

/// Guard returned by [`Environment::rebind`]
#[derive(Debug)]
pub struct ScopedBinding<'a> {
    env: &'a mut Environment,
    name: String,
    previous: Option<f64>,
}

impl ScopedBinding<'_> {
    /// Install a new value for the guarded name
    pub fn set(&mut self, value: f64) {
        self.env.define(self.name.as_str(), value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Deref for ScopedBinding<'_> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        self.env
    }
}

impl DerefMut for ScopedBinding<'_> {
    fn deref_mut(&mut self) -> &mut Environment {
        self.env
    }
}

impl Drop for ScopedBinding<'_> {
    fn drop(&mut self) {
        match self.previous {
            Some(value) => self.env.define(self.name.as_str(), value),
            None => {
                self.env.remove(&self.name);
            }
        }
    }
}
