//! Lexical scope stack
//!
//! The bottom scope is the global scope and is never popped.

use indexmap::IndexMap;
use minijs_parser::Span;

/// Names declared in one block or function, with their declaration sites
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: IndexMap<String, Span>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<Span> {
        self.bindings.get(name).copied()
    }

}

#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of open scopes, counting the global scope
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Bind `name` in the innermost scope.
    ///
    /// Returns the earlier declaration site when the innermost scope already
    /// holds `name`; the existing binding is left untouched.
    pub fn declare(&mut self, name: &str, span: Span) -> Result<(), Span> {
        let innermost = self.innermost_mut();
        if let Some(previous) = innermost.get(name) {
            return Err(previous);
        }
        innermost.bindings.insert(name.to_string(), span);
        Ok(())
    }

    /// Find `name`, innermost scope first
    pub fn lookup(&self, name: &str) -> Option<Span> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn innermost_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}
