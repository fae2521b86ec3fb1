// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Built-in functions (always available, no import needed).
//!
//! Control flow, list helpers and printing. Every builtin receives its
//! arguments as thunks and decides itself what to force.

mod collections;
mod control;
mod printing;

use crate::env::Scope;
use crate::function::Thunk;
use crate::interp::EvalError;
use crate::lazy::Lazy;
use crate::output::Output;
use crate::value::Value;

/// A fresh root scope holding the builtin library.
pub fn root_scope(output: &Output) -> Scope {
    let scope = Scope::new();
    install(&scope, output);
    tracing::debug!(bindings = scope.names().len(), "built root scope");
    scope
}

/// Add the builtin library to an existing scope.
pub fn install(scope: &Scope, output: &Output) {
    for func in control::functions()
        .into_iter()
        .chain(collections::functions())
        .chain(printing::functions(output))
    {
        scope.define(func.name().to_string(), Lazy::ready(Value::Function(func)));
    }
}

/// Force an argument, or Undefined when the caller left it out.
fn force_arg(args: &[Thunk], index: usize) -> Result<Value, EvalError> {
    match args.get(index) {
        Some(arg) => arg.force()?.resolve(),
        None => Ok(Value::Undefined),
    }
}

fn expected(builtin: &str, what: &str, found: &Value) -> EvalError {
    EvalError::TypeMismatch(format!(
        "{} expects {}, found {}",
        builtin,
        what,
        found.type_name()
    ))
}
