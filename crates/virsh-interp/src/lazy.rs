// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Deferred values, storage slots, and the references evaluation produces.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::interp::EvalError;
use crate::value::Value;

type Pending = Box<dyn FnOnce() -> Result<Value, EvalError>>;

enum LazyState {
    Ready(Value),
    Pending(Pending),
    /// The pending computation is running; forcing again is a cycle.
    Forcing,
    Failed(EvalError),
}

/// A value that may still have to be computed.
///
/// Forcing runs the computation at most once; later forces see the same
/// value, or the same failure. Clones share the cell.
#[derive(Clone)]
pub struct Lazy(Rc<RefCell<LazyState>>);

impl Lazy {
    pub fn ready(value: Value) -> Self {
        Lazy(Rc::new(RefCell::new(LazyState::Ready(value))))
    }

    pub fn pending(compute: impl FnOnce() -> Result<Value, EvalError> + 'static) -> Self {
        Lazy(Rc::new(RefCell::new(LazyState::Pending(Box::new(compute)))))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(&*self.0.borrow(), LazyState::Ready(_))
    }

    /// Force the value.
    pub fn resolve(&self) -> Result<Value, EvalError> {
        if let LazyState::Ready(value) = &*self.0.borrow() {
            return Ok(value.clone());
        }

        let state = std::mem::replace(&mut *self.0.borrow_mut(), LazyState::Forcing);
        match state {
            LazyState::Ready(value) => {
                *self.0.borrow_mut() = LazyState::Ready(value.clone());
                Ok(value)
            }
            LazyState::Pending(compute) => {
                let result = compute();
                *self.0.borrow_mut() = match &result {
                    Ok(value) => LazyState::Ready(value.clone()),
                    Err(err) => LazyState::Failed(err.clone()),
                };
                result
            }
            LazyState::Forcing => Err(EvalError::TypeMismatch(
                "value depends on itself".to_string(),
            )),
            LazyState::Failed(err) => {
                *self.0.borrow_mut() = LazyState::Failed(err.clone());
                Err(err)
            }
        }
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0.borrow() {
            LazyState::Ready(value) => write!(f, "Lazy({:?})", value),
            LazyState::Pending(_) | LazyState::Forcing => f.write_str("Lazy(<pending>)"),
            LazyState::Failed(err) => write!(f, "Lazy(<failed: {}>)", err),
        }
    }
}

/// A mutable storage cell: the thing a name is bound to.
///
/// `set` replaces the held value outright; the old value is never mutated.
#[derive(Clone, Debug)]
pub struct Slot(Rc<RefCell<Lazy>>);

impl Slot {
    pub fn new(value: Lazy) -> Self {
        Slot(Rc::new(RefCell::new(value)))
    }

    pub fn undefined() -> Self {
        Self::new(Lazy::ready(Value::Undefined))
    }

    pub fn get(&self) -> Lazy {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: Lazy) {
        *self.0.borrow_mut() = value;
    }

    pub fn ptr_eq(&self, other: &Slot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// What evaluating a node yields.
#[derive(Clone, Debug)]
pub enum Reference {
    /// A computed result.
    ReadOnly(Lazy),
    /// A binding that can be assigned through.
    ReadWrite(Slot),
}

impl Reference {
    pub fn value(value: Value) -> Self {
        Reference::ReadOnly(Lazy::ready(value))
    }

    pub fn undefined() -> Self {
        Self::value(Value::Undefined)
    }

    /// The (possibly still pending) value behind this reference.
    pub fn lazy(&self) -> Lazy {
        match self {
            Reference::ReadOnly(lazy) => lazy.clone(),
            Reference::ReadWrite(slot) => slot.get(),
        }
    }

    /// Force the value behind this reference.
    pub fn get(&self) -> Result<Value, EvalError> {
        self.lazy().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn pending_runs_once() {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let lazy = Lazy::pending(move || {
            counter.set(counter.get() + 1);
            Ok(Value::Num(7.0))
        });
        assert!(!lazy.is_resolved());
        let copy = lazy.clone();
        assert!(matches!(lazy.resolve(), Ok(Value::Num(n)) if n == 7.0));
        assert!(matches!(copy.resolve(), Ok(Value::Num(n)) if n == 7.0));
        assert_eq!(runs.get(), 1);
        assert!(copy.is_resolved());
    }

    #[test]
    fn failure_is_remembered() {
        let lazy = Lazy::pending(|| Err(EvalError::TypeMismatch("boom".to_string())));
        assert!(lazy.resolve().is_err());
        assert!(matches!(lazy.resolve(), Err(EvalError::TypeMismatch(m)) if m == "boom"));
    }

    #[test]
    fn set_replaces_without_touching_old_value() {
        let slot = Slot::new(Lazy::ready(Value::Num(1.0)));
        let before = slot.get();
        slot.set(Lazy::ready(Value::Num(2.0)));
        assert!(matches!(before.resolve(), Ok(Value::Num(n)) if n == 1.0));
        assert!(matches!(Reference::ReadWrite(slot).get(), Ok(Value::Num(n)) if n == 2.0));
    }
}
