//! Environment and function table for the minijs interpreter.
//!
//! Scoping is flat: one active mapping of names to values. A call swaps in a
//! fresh mapping holding only the parameters and swaps the caller's back on
//! return, so function bodies never observe the caller's locals. Named
//! functions live in a separate table that stays visible everywhere.

use crate::value::{Callable, Value};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::rc::Rc;

pub type Bindings = IndexMap<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Bindings of the currently executing body
    active: Bindings,
    /// Named function declarations
    functions: HashMap<String, Rc<Callable>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name in the active mapping, replacing any previous binding
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.active.insert(name.into(), value);
    }

    /// Rebind a name. Assignment never fails at this level; the scope
    /// checker is responsible for rejecting assignments to undeclared names.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.active.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.active.insert(name.to_string(), value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.active.get(name)
    }

    pub fn define_function(&mut self, name: impl Into<String>, callable: Rc<Callable>) {
        self.functions.insert(name.into(), callable);
    }

    pub fn function(&self, name: &str) -> Option<&Rc<Callable>> {
        self.functions.get(name)
    }

    /// Install `frame` as the active mapping, returning the one it replaces
    pub fn swap_active(&mut self, frame: Bindings) -> Bindings {
        std::mem::replace(&mut self.active, frame)
    }

    /// Copy of the active mapping, for restoring after a `catch` block
    pub fn snapshot(&self) -> Bindings {
        self.active.clone()
    }

    pub fn restore(&mut self, saved: Bindings) {
        self.active = saved;
    }

    /// Active bindings in definition order
    pub fn variables(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.active.iter()
    }

    /// Names of all declared functions, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drop every binding and function
    pub fn clear(&mut self) {
        self.active.clear();
        self.functions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CallableBody;
    use minijs_parser::{Block, Span};
    use pretty_assertions::assert_eq;

    fn empty_function(name: &str) -> Rc<Callable> {
        Rc::new(Callable::new(
            Some(name.to_string()),
            vec![],
            CallableBody::Block(Block {
                statements: vec![],
                span: Span::default(),
            }),
        ))
    }

    #[test]
    fn test_define_and_set() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        env.set("x", Value::Number(2.0));
        assert_eq!(env.get("x"), Some(&Value::Number(2.0)));
        assert!(env.get("y").is_none());
    }

    #[test]
    fn test_swap_hides_caller_bindings() {
        let mut env = Environment::new();
        env.define("outer", Value::Boolean(true));
        let mut frame = Bindings::new();
        frame.insert("param".to_string(), Value::Number(3.0));
        let saved = env.swap_active(frame);
        assert!(env.get("outer").is_none());
        assert!(env.get("param").is_some());
        env.restore(saved);
        assert!(env.get("outer").is_some());
        assert!(env.get("param").is_none());
    }

    #[test]
    fn test_functions_survive_frame_swaps() {
        let mut env = Environment::new();
        env.define_function("f", empty_function("f"));
        let saved = env.swap_active(Bindings::new());
        assert!(env.function("f").is_some());
        env.restore(saved);
        assert_eq!(env.function_names(), vec!["f"]);
    }

    #[test]
    fn test_variables_in_definition_order() {
        let mut env = Environment::new();
        env.define("b", Value::Undefined);
        env.define("a", Value::Undefined);
        let names: Vec<&String> = env.variables().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
        env.clear();
        assert_eq!(env.variables().count(), 0);
    }
}
