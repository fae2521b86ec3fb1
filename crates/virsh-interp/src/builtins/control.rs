// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `if`, `for`, `with` and `func`.

use crate::env::Scope;
use crate::function::{Completion, Function, Signal};
use crate::lazy::Lazy;
use crate::value::Value;

use super::{expected, force_arg};

pub(super) fn functions() -> Vec<Function> {
    vec![
        Function::native("if", 1, |scope, args| {
            // Condition and branches share one child scope.
            let local = scope.child();
            let cond = match args.first() {
                Some(cond) => cond.force_in(&local)?.resolve()?,
                None => Value::Undefined,
            };
            let branch = if cond.is_truthy() { args.get(1) } else { args.get(2) };
            match branch {
                Some(branch) => Ok(Completion::Value(branch.force_in(&local)?)),
                None => Ok(Completion::value(Value::Undefined)),
            }
        }),
        Function::native("for", 1, |scope, args| {
            let generator = match force_arg(args, 0)? {
                Value::Function(func) => func,
                other => return Err(expected("for", "a generator", &other)),
            };
            let body = args.get(1).cloned();
            let mut last = Lazy::ready(Value::Undefined);
            loop {
                match generator.call(scope, body.as_slice())? {
                    Completion::Value(value) => last = value,
                    Completion::Signal(Signal::StopGenerator) => break,
                }
            }
            Ok(Completion::Value(last))
        }),
        Function::native("with", 1, |_scope, args| {
            let target = match force_arg(args, 0)? {
                Value::Scope(target) => target,
                other => return Err(expected("with", "a Scope", &other)),
            };
            match args.get(1) {
                Some(body) => Ok(Completion::Value(body.force_in(&target)?)),
                None => Ok(Completion::value(Value::Undefined)),
            }
        }),
        Function::native("func", 1, |scope, args| {
            let Some(body) = args.first().cloned() else {
                return Ok(Completion::value(Value::Undefined));
            };
            // One closure scope for the function's lifetime; calls write
            // their arguments into it.
            let closure = scope.child();
            let func = Function::native("func", 1, move |_caller, args| {
                let record = match force_arg(args, 0)? {
                    Value::Scope(record) => record,
                    other => return Err(expected("func", "a Scope argument", &other)),
                };
                bind_all(&closure, &record);
                Ok(Completion::Value(body.force_in(&closure)?))
            });
            Ok(Completion::value(func))
        }),
    ]
}

fn bind_all(target: &Scope, source: &Scope) {
    for (name, slot) in source.bindings() {
        target.define(name, slot.get());
    }
}
