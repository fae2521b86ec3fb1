// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The interpreter implementation.
//!
//! A tree-walk evaluator over the syntax tree. Every node evaluates to a
//! [`Reference`]; call arguments stay unevaluated until the callee forces
//! them, which is what lets `if` and `for` be ordinary functions.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;

mod assign;
mod call;
mod collections;
mod eval_expr;
mod format;
mod operators;

pub use eval_expr::evaluate;

use virsh_ast::Node;
use virsh_parser::ParseError;

use crate::builtins;
use crate::env::Scope;
use crate::lazy::Reference;
use crate::output::Output;
use crate::reify::{reify, Reified};
use crate::stdlib;

/// The evaluation entry point. Builtins in the global scope hold the output
/// sink they write to.
pub struct Interpreter {
    global: Scope,
}

impl Interpreter {
    /// Builtins only, printing to stdout.
    pub fn new() -> Self {
        Self {
            global: builtins::root_scope(&Output::Stdout),
        }
    }

    /// Builtins plus the `fs` and `io` namespaces.
    pub fn with_io() -> Self {
        Self {
            global: stdlib::root_scope_with_io(&Output::Stdout),
        }
    }

    /// Returns interpreter and output buffer reference.
    pub fn with_captured_output() -> (Self, Rc<RefCell<String>>) {
        let buffer = Rc::new(RefCell::new(String::new()));
        let interp = Self {
            global: builtins::root_scope(&Output::Buffer(buffer.clone())),
        };
        (interp, buffer)
    }

    /// Evaluate against a caller-built scope.
    pub fn with_scope(scope: Scope) -> Self {
        Self { global: scope }
    }

    pub fn global(&self) -> &Scope {
        &self.global
    }

    pub fn parse(&self, source: &str) -> Result<Node, EvalError> {
        Ok(virsh_parser::parse(source)?)
    }

    /// Evaluate a parsed program in the global scope.
    pub fn eval_node(&self, node: &Node) -> Result<Reference, EvalError> {
        evaluate(node, &self.global, true)
    }

    /// Parse, evaluate and reify a program.
    pub fn eval(&self, source: &str) -> Result<Reified, EvalError> {
        let node = self.parse(source)?;
        reify(&self.eval_node(&node)?)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// An evaluation failure. Aborts the whole evaluation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvalError {
    #[error("invalid assignment target: {0}")]
    InvalidAssignmentTarget(String),

    #[error("{0}")]
    TypeMismatch(String),

    #[error("{0} is not iterable")]
    NotIterable(String),

    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    #[error("call depth limit of {0} exceeded (runaway recursion?)")]
    RecursionLimit(usize),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: Arc<io::Error>,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
