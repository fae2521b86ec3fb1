// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Assignment and in-place update.

use virsh_ast::{Node, PostfixOp};

use crate::env::Scope;
use crate::lazy::{Lazy, Reference, Slot};
use crate::value::Value;

use super::{evaluate, EvalError};

/// `target = value`. The value is stored unforced; the result is the
/// right-hand reference itself.
pub(super) fn eval_assign(target: &Node, value: &Node, scope: &Scope) -> Result<Reference, EvalError> {
    let slot = writable(target, scope)?;
    let rhs = evaluate(value, scope, true)?;
    slot.set(rhs.lazy());
    Ok(rhs)
}

/// `target++`, `target--`, `target!!`: update the slot, yield the old value.
pub(super) fn eval_postfix(target: &Node, op: PostfixOp, scope: &Scope) -> Result<Reference, EvalError> {
    let slot = writable(target, scope)?;
    let old = slot.get().resolve()?;
    let new = match (op, &old) {
        (PostfixOp::Inc, Value::Num(n)) => Value::Num(n + 1.0),
        (PostfixOp::Dec, Value::Num(n)) => Value::Num(n - 1.0),
        (PostfixOp::Flip, Value::Bool(b)) => Value::Bool(!b),
        (PostfixOp::Inc, other) => return Err(mismatch("increment", other)),
        (PostfixOp::Dec, other) => return Err(mismatch("decrement", other)),
        (PostfixOp::Flip, other) => return Err(mismatch("invert", other)),
    };
    slot.set(Lazy::ready(new));
    Ok(Reference::value(old))
}

fn writable(target: &Node, scope: &Scope) -> Result<Slot, EvalError> {
    match evaluate(target, scope, false)? {
        Reference::ReadWrite(slot) => Ok(slot),
        Reference::ReadOnly(_) => Err(EvalError::InvalidAssignmentTarget(
            virsh_fmt::recompile(target),
        )),
    }
}

fn mismatch(verb: &str, value: &Value) -> EvalError {
    EvalError::TypeMismatch(format!("cannot {} {}", verb, value.type_name()))
}
