// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Callable values and the lazy arguments they receive.

use std::cell::Cell;
use std::rc::Rc;

use virsh_ast::Node;

use crate::env::Scope;
use crate::interp::{evaluate, EvalError};
use crate::lazy::Lazy;

/// Control markers a function may return instead of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A generator has no more elements.
    StopGenerator,
}

/// What a function call produces.
#[derive(Debug, Clone)]
pub enum Completion {
    Value(Lazy),
    Signal(Signal),
}

impl Completion {
    pub fn value(value: impl Into<crate::value::Value>) -> Self {
        Completion::Value(Lazy::ready(value.into()))
    }
}

/// An unevaluated call argument.
///
/// Holds the argument's syntax and the caller's scope; nothing runs until
/// the callee forces it.
#[derive(Clone)]
pub struct Thunk {
    node: Rc<Node>,
    scope: Scope,
}

impl Thunk {
    pub fn new(node: Rc<Node>, scope: Scope) -> Self {
        Thunk { node, scope }
    }

    /// Evaluate the argument in the scope it was written in.
    pub fn force(&self) -> Result<Lazy, EvalError> {
        self.force_in(&self.scope)
    }

    /// Evaluate the argument in another scope.
    pub fn force_in(&self, scope: &Scope) -> Result<Lazy, EvalError> {
        Ok(evaluate(&self.node, scope, true)?.lazy())
    }
}

/// Nested calls allowed before evaluation gives up.
pub const MAX_CALL_DEPTH: usize = 5_000;

thread_local! {
    static CALL_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// One level of call nesting, released on drop.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Result<Self, EvalError> {
        CALL_DEPTH.with(|depth| {
            if depth.get() >= MAX_CALL_DEPTH {
                return Err(EvalError::RecursionLimit(MAX_CALL_DEPTH));
            }
            depth.set(depth.get() + 1);
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        CALL_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

type Callback = dyn Fn(&Scope, &[Thunk]) -> Result<Completion, EvalError>;

struct FunctionData {
    name: String,
    arity: usize,
    params: Vec<String>,
    callback: Box<Callback>,
}

/// A native or user-defined function.
///
/// `arity` is the declared minimum argument count; a zero-arity function
/// named as a value is invoked on the spot.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    pub fn native(
        name: impl Into<String>,
        arity: usize,
        callback: impl Fn(&Scope, &[Thunk]) -> Result<Completion, EvalError> + 'static,
    ) -> Self {
        Function(Rc::new(FunctionData {
            name: name.into(),
            arity,
            params: Vec::new(),
            callback: Box::new(callback),
        }))
    }

    /// A function with named parameters; its arity is the parameter count.
    pub fn with_params(
        name: impl Into<String>,
        params: Vec<String>,
        callback: impl Fn(&Scope, &[Thunk]) -> Result<Completion, EvalError> + 'static,
    ) -> Self {
        Function(Rc::new(FunctionData {
            name: name.into(),
            arity: params.len(),
            params,
            callback: Box::new(callback),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn arity(&self) -> usize {
        self.0.arity
    }

    pub fn params(&self) -> &[String] {
        &self.0.params
    }

    /// Invoke with the caller's scope and unevaluated arguments.
    pub fn call(&self, scope: &Scope, args: &[Thunk]) -> Result<Completion, EvalError> {
        let _depth = DepthGuard::enter()?;
        tracing::trace!(function = %self.0.name, args = args.len(), "call");
        (self.0.callback)(scope, args)
    }
}
