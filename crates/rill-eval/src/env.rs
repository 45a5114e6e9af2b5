//! The environment chain.
//!
//! An [`Env`] is one scope: a variable map, a function map, and an
//! optional link to the enclosing scope. Variables and functions are
//! independent namespaces, so a variable may share its name with a
//! function. Lookups walk the chain outward; an inner binding shadows any
//! outer binding of the same name.
//!
//! Scopes are shared via `Rc<RefCell<_>>` because a child scope holds a
//! handle to its parent while the evaluator also does; the parent outlives
//! the child by construction and the language cannot form scope cycles.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use rill_par::FuncDef;
use rill_util::Symbol;

use crate::value::Value;

/// Shared handle to a scope.
pub type EnvRef = Rc<std::cell::RefCell<Env>>;

/// A single scope in the environment chain.
pub struct Env {
    /// Variable bindings in this scope.
    vars: FxHashMap<Symbol, Value>,
    /// Function bindings in this scope. Disjoint from `vars`.
    funcs: FxHashMap<Symbol, Rc<FuncDef>>,
    /// The enclosing scope, absent for the root.
    parent: Option<EnvRef>,
}

impl Env {
    /// Creates a root scope with no enclosing environment.
    pub fn root() -> EnvRef {
        Rc::new(std::cell::RefCell::new(Env {
            vars: FxHashMap::default(),
            funcs: FxHashMap::default(),
            parent: None,
        }))
    }

    /// Creates a child scope of `parent`.
    pub fn child(parent: &EnvRef) -> EnvRef {
        Rc::new(std::cell::RefCell::new(Env {
            vars: FxHashMap::default(),
            funcs: FxHashMap::default(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Binds a variable in this scope, shadowing any outer binding.
    pub fn define(&mut self, name: Symbol, value: Value) {
        self.vars.insert(name, value);
    }

    /// Binds a function in this scope's function namespace.
    pub fn define_func(&mut self, def: Rc<FuncDef>) {
        self.funcs.insert(def.name, def);
    }

    /// Reads a variable, walking the chain outward.
    ///
    /// Returns `None` when the name is not bound anywhere; the evaluator
    /// turns that into `null` (reads are tolerant).
    pub fn lookup(&self, name: Symbol) -> Option<Value> {
        if let Some(value) = self.vars.get(&name) {
            return Some(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => None,
        }
    }

    /// Overwrites the nearest existing binding of `name`.
    ///
    /// Returns false when no scope in the chain binds the name; the
    /// evaluator turns that into a runtime error (writes are strict).
    pub fn assign(&mut self, name: Symbol, value: Value) -> bool {
        if let Some(slot) = self.vars.get_mut(&name) {
            *slot = value;
            return true;
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }

    /// Resolves a function, walking the chain outward.
    pub fn lookup_func(&self, name: Symbol) -> Option<Rc<FuncDef>> {
        if let Some(def) = self.funcs.get(&name) {
            return Some(Rc::clone(def));
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup_func(name),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_par::Block;

    fn sym(s: &str) -> Symbol {
        Symbol::intern(s)
    }

    fn func(name: &str) -> Rc<FuncDef> {
        Rc::new(FuncDef {
            name: sym(name),
            params: Vec::new(),
            body: Block {
                stmts: Vec::new(),
                line: 1,
            },
            line: 1,
        })
    }

    #[test]
    fn test_define_and_lookup() {
        let root = Env::root();
        root.borrow_mut().define(sym("x"), Value::Int(1));
        assert_eq!(root.borrow().lookup(sym("x")).map(|v| v.to_string()), Some("1".into()));
        assert!(root.borrow().lookup(sym("y")).is_none());
    }

    #[test]
    fn test_lookup_walks_chain() {
        let root = Env::root();
        root.borrow_mut().define(sym("x"), Value::Int(1));
        let inner = Env::child(&root);
        let innermost = Env::child(&inner);
        assert_eq!(
            innermost.borrow().lookup(sym("x")).map(|v| v.to_string()),
            Some("1".into())
        );
    }

    #[test]
    fn test_inner_binding_shadows_outer() {
        let root = Env::root();
        root.borrow_mut().define(sym("x"), Value::Int(1));
        let inner = Env::child(&root);
        inner.borrow_mut().define(sym("x"), Value::Int(2));

        assert_eq!(inner.borrow().lookup(sym("x")).map(|v| v.to_int()), Some(2));
        // The outer binding is untouched.
        assert_eq!(root.borrow().lookup(sym("x")).map(|v| v.to_int()), Some(1));
    }

    #[test]
    fn test_assign_overwrites_nearest_binding() {
        let root = Env::root();
        root.borrow_mut().define(sym("x"), Value::Int(1));
        let inner = Env::child(&root);

        assert!(inner.borrow_mut().assign(sym("x"), Value::Int(9)));
        assert_eq!(root.borrow().lookup(sym("x")).map(|v| v.to_int()), Some(9));
    }

    #[test]
    fn test_assign_unknown_fails() {
        let root = Env::root();
        let inner = Env::child(&root);
        assert!(!inner.borrow_mut().assign(sym("missing"), Value::Int(1)));
    }

    #[test]
    fn test_var_and_func_namespaces_are_disjoint() {
        let root = Env::root();
        root.borrow_mut().define(sym("f"), Value::Int(1));
        root.borrow_mut().define_func(func("f"));

        assert_eq!(root.borrow().lookup(sym("f")).map(|v| v.to_int()), Some(1));
        assert!(root.borrow().lookup_func(sym("f")).is_some());
    }

    #[test]
    fn test_func_lookup_walks_chain() {
        let root = Env::root();
        root.borrow_mut().define_func(func("helper"));
        let inner = Env::child(&root);
        assert!(inner.borrow().lookup_func(sym("helper")).is_some());
        assert!(inner.borrow().lookup_func(sym("other")).is_none());
    }
}
