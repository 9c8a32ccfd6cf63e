// ABOUTME: Environment module for managing variable bindings and lexical scopes

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A lexical scope: a name→value mapping chained to an optional outer
/// environment. Shared by `Rc` so closures can capture it by reference —
/// mutations made after capture are observable through the closure.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates the root environment (no outer scope).
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            outer: None,
        })
    }

    /// Creates a child scope enclosed by `outer`.
    pub fn enclosed(outer: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    /// Looks up `name` in this scope, then walks the outer chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Binds `name` in THIS scope only. Does not walk or mutate the outer
    /// chain — an assignment inside a nested scope shadows rather than
    /// rebinds an outer binding of the same name.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let env = Environment::new();
        env.set("x", Value::Integer(42));
        assert_eq!(env.get("x"), Some(Value::Integer(42)));
    }

    #[test]
    fn undefined_name_is_none() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
    }

    #[test]
    fn inner_scope_shadows_without_mutating_outer() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(1));

        let inner = Environment::enclosed(outer.clone());
        inner.set("x", Value::Integer(2));

        assert_eq!(inner.get("x"), Some(Value::Integer(2)));
        assert_eq!(outer.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn inner_scope_sees_outer_bindings() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(7));
        let inner = Environment::enclosed(outer);
        assert_eq!(inner.get("x"), Some(Value::Integer(7)));
    }

    #[test]
    fn closure_observes_later_mutation_of_captured_env() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(1));
        let captured = outer.clone();
        outer.set("x", Value::Integer(2));
        assert_eq!(captured.get("x"), Some(Value::Integer(2)));
    }

    #[test]
    fn multiple_levels_resolve_through_chain() {
        let grandparent = Environment::new();
        grandparent.set("a", Value::Integer(1));

        let parent = Environment::enclosed(grandparent);
        parent.set("b", Value::Integer(2));

        let child = Environment::enclosed(parent);
        child.set("c", Value::Integer(3));

        assert_eq!(child.get("a"), Some(Value::Integer(1)));
        assert_eq!(child.get("b"), Some(Value::Integer(2)));
        assert_eq!(child.get("c"), Some(Value::Integer(3)));
    }
}
