// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Function calls, function literals and generator bindings.

use std::cell::RefCell;
use std::rc::Rc;

use virsh_ast::Node;

use crate::env::Scope;
use crate::function::{Completion, Function, Signal, Thunk};
use crate::lazy::{Lazy, Reference};
use crate::value::Value;

use super::{evaluate, EvalError};

/// `callee arg1 arg2 ...`. Arguments are handed over unevaluated.
///
/// The callee is read as a value, so a zero-arity function in call position
/// runs first and its result is what gets called.
pub(super) fn eval_call(callee: &Node, args: &[Rc<Node>], scope: &Scope) -> Result<Reference, EvalError> {
    let func = match evaluate(callee, scope, true)?.get()? {
        Value::Function(func) => func,
        other => {
            return Err(EvalError::TypeMismatch(format!(
                "cannot call {} `{}`",
                other.type_name(),
                virsh_fmt::recompile(callee)
            )))
        }
    };
    let thunks: Vec<Thunk> = args
        .iter()
        .map(|arg| Thunk::new(Rc::clone(arg), scope.clone()))
        .collect();
    match func.call(scope, &thunks)? {
        Completion::Value(lazy) => Ok(Reference::ReadOnly(lazy)),
        Completion::Signal(_) => Ok(Reference::undefined()),
    }
}

/// `params => body`. Each call gets a fresh scope under the defining one;
/// parameters are bound to the forced arguments, missing ones to Undefined.
pub(super) fn eval_function(params: &[String], body: &Rc<Node>, scope: &Scope) -> Reference {
    let definition = scope.clone();
    let body = Rc::clone(body);
    let names = params.to_vec();
    let func = Function::with_params("<lambda>", params.to_vec(), move |_caller, args| {
        let local = definition.child();
        for (i, name) in names.iter().enumerate() {
            let value = match args.get(i) {
                Some(arg) => arg.force()?,
                None => Lazy::ready(Value::Undefined),
            };
            local.define(name.as_str(), value);
        }
        Ok(Completion::Value(evaluate(&body, &local, true)?.lazy()))
    });
    Reference::value(Value::Function(func))
}

/// `name <- source`: a stepper function over `source`.
///
/// Each call takes the next element, binds it to `name` in a child of the
/// caller's scope and forces the continuation argument there. Once the
/// list runs out every call returns [`Signal::StopGenerator`].
pub(super) fn eval_take(name: &str, source: &Node, scope: &Scope) -> Result<Reference, EvalError> {
    let list = match evaluate(source, scope, true)?.get()? {
        Value::List(list) => list,
        other => return Err(EvalError::NotIterable(other.type_name().to_string())),
    };
    let cursor = RefCell::new(list.cursor());
    let name = name.to_string();
    let stepper = Function::native("generator", 1, move |caller, args| {
        let next = cursor.borrow_mut().next();
        let Some(item) = next else {
            tracing::trace!(name = %name, "generator exhausted");
            return Ok(Completion::Signal(Signal::StopGenerator));
        };
        let item = item?;
        tracing::trace!(name = %name, "generator step");
        let step = caller.child();
        step.define(name.as_str(), item.clone());
        match args.first() {
            Some(body) => Ok(Completion::Value(body.force_in(&step)?)),
            None => Ok(Completion::Value(item)),
        }
    });
    Ok(Reference::value(Value::Function(stepper)))
}
