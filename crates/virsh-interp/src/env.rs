// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexical environments.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::lazy::{Lazy, Slot};

struct ScopeData {
    bindings: RefCell<IndexMap<String, Slot>>,
    parent: Option<Scope>,
}

/// A scope in the environment chain.
///
/// Scopes double as records: a `{k: v}` literal is a scope with no parent.
/// Children hold their parent; a parent never sees its children.
#[derive(Clone)]
pub struct Scope(Rc<ScopeData>);

impl Scope {
    /// Create an empty scope with no parent.
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    fn with_parent(parent: Option<Scope>) -> Self {
        Scope(Rc::new(ScopeData {
            bindings: RefCell::new(IndexMap::new()),
            parent,
        }))
    }

    /// Create an empty scope whose lookups fall back to `self`.
    pub fn child(&self) -> Self {
        Self::with_parent(Some(self.clone()))
    }

    pub fn parent(&self) -> Option<&Scope> {
        self.0.parent.as_ref()
    }

    /// Find the slot bound to `name` here or in an ancestor.
    pub fn lookup(&self, name: &str) -> Option<Slot> {
        let mut scope = self;
        loop {
            if let Some(slot) = scope.0.bindings.borrow().get(name) {
                return Some(slot.clone());
            }
            scope = scope.parent()?;
        }
    }

    /// Look up `name`, declaring it as Undefined in this scope when nothing
    /// in the chain binds it. Repeated calls return the same slot.
    pub fn get(&self, name: &str) -> Slot {
        if let Some(slot) = self.lookup(name) {
            return slot;
        }
        let slot = Slot::undefined();
        self.0
            .bindings
            .borrow_mut()
            .insert(name.to_string(), slot.clone());
        slot
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    pub fn define(&self, name: impl Into<String>, value: Lazy) {
        let name = name.into();
        let mut bindings = self.0.bindings.borrow_mut();
        match bindings.get(&name) {
            Some(slot) => slot.set(value),
            None => {
                bindings.insert(name, Slot::new(value));
            }
        }
    }

    /// This scope's own bindings in declaration order.
    pub fn bindings(&self) -> Vec<(String, Slot)> {
        self.0
            .bindings
            .borrow()
            .iter()
            .map(|(name, slot)| (name.clone(), slot.clone()))
            .collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.bindings.borrow().keys().cloned().collect()
    }

    pub fn ptr_eq(&self, other: &Scope) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
