// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression evaluation.

use std::rc::Rc;

use virsh_ast::{Node, NodeKind};

use crate::env::Scope;
use crate::function::Completion;
use crate::lazy::Reference;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

use super::{assign, call, collections, format, operators, EvalError};

/// Evaluate `node` in `scope`.
///
/// With `as_value` set, a name bound to a zero-arity function calls it and
/// yields the result. Assignment targets pass `false` to get the raw slot.
pub fn evaluate(node: &Node, scope: &Scope, as_value: bool) -> Result<Reference, EvalError> {
    ensure_sufficient_stack(|| eval_kind(node, scope, as_value))
}

fn eval_kind(node: &Node, scope: &Scope, as_value: bool) -> Result<Reference, EvalError> {
    match &node.kind {
        NodeKind::Number(n) => Ok(Reference::value(Value::Num(*n))),
        NodeKind::Bool(b) => Ok(Reference::value(Value::Bool(*b))),
        NodeKind::RawString(s) => Ok(Reference::value(Value::from(s.as_str()))),
        NodeKind::Template(text) => {
            Ok(Reference::value(Value::from(format::interpolate(text, scope)?)))
        }
        NodeKind::Reference(name) => lookup(name, scope, as_value),
        NodeKind::Path(path) => Ok(Reference::ReadWrite(scope.get(path))),

        NodeKind::Assign { target, value } => assign::eval_assign(target, value, scope),
        NodeKind::Look { target, member, .. } => {
            let base = evaluate(target, scope, true)?.get()?;
            match base {
                Value::Scope(inner) => lookup(member, &inner, as_value),
                other => Err(EvalError::TypeMismatch(format!(
                    "cannot look into {} for `{}`",
                    other.type_name(),
                    member
                ))),
            }
        }
        NodeKind::Index { target, index } => collections::eval_index(target, index, scope),

        NodeKind::Block(items) => eval_sequence(items, &scope.child()),
        NodeKind::Paren(items) | NodeKind::Sequence(items) => eval_sequence(items, scope),
        NodeKind::List(items) => collections::eval_list(items, scope),
        NodeKind::Record(fields) => collections::eval_record(fields, scope),

        NodeKind::Call { callee, args } => call::eval_call(callee, args, scope),
        NodeKind::Postfix { target, op } => assign::eval_postfix(target, *op, scope),
        NodeKind::Binary { op, lhs, rhs } => operators::eval_binary(*op, lhs, rhs, scope),
        NodeKind::Compare { op, lhs, rhs } => operators::eval_compare(*op, lhs, rhs, scope),
        NodeKind::Range { from, to } => collections::eval_range(from, to, scope),
        NodeKind::Take { name, source } => call::eval_take(name, source, scope),
        NodeKind::Function { params, body } => Ok(call::eval_function(params, body, scope)),
        NodeKind::Not(operand) => operators::eval_not(operand, scope),
        NodeKind::Operator(op) => Err(EvalError::UnknownOperator(op.clone())),
    }
}

/// Resolve a name, calling zero-arity functions when a value is wanted.
fn lookup(name: &str, scope: &Scope, as_value: bool) -> Result<Reference, EvalError> {
    let slot = scope.get(name);
    if as_value {
        if let Value::Function(func) = slot.get().resolve()? {
            if func.arity() == 0 {
                return Ok(match func.call(scope, &[])? {
                    Completion::Value(lazy) => Reference::ReadOnly(lazy),
                    Completion::Signal(_) => Reference::undefined(),
                });
            }
        }
    }
    Ok(Reference::ReadWrite(slot))
}

/// Statements in order; the last one's reference is the result.
fn eval_sequence(items: &[Rc<Node>], scope: &Scope) -> Result<Reference, EvalError> {
    let mut last = Reference::undefined();
    for item in items {
        last = evaluate(item, scope, true)?;
    }
    Ok(last)
}
