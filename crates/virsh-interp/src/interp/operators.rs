// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Arithmetic, comparison and negation.

use virsh_ast::{BinOp, CompareOp, Node};

use crate::env::Scope;
use crate::lazy::Reference;
use crate::reify::reify_value;
use crate::value::Value;

use super::{evaluate, EvalError};

fn operands(lhs: &Node, rhs: &Node, scope: &Scope) -> Result<(Value, Value), EvalError> {
    let l = evaluate(lhs, scope, true)?.get()?;
    let r = evaluate(rhs, scope, true)?.get()?;
    Ok((l, r))
}

/// `+` and `-` go through the operand's capability; `%` needs two numbers.
pub(super) fn eval_binary(op: BinOp, lhs: &Node, rhs: &Node, scope: &Scope) -> Result<Reference, EvalError> {
    let (l, r) = operands(lhs, rhs, scope)?;
    let out = match op {
        BinOp::Add => match l.as_addable() {
            Some(addable) => addable.add(&r)?,
            None => {
                return Err(EvalError::TypeMismatch(format!(
                    "cannot add {} and {}",
                    l.type_name(),
                    r.type_name()
                )))
            }
        },
        BinOp::Sub => match l.as_subtractable() {
            Some(subtractable) => subtractable.subtract(&r)?,
            None => {
                return Err(EvalError::TypeMismatch(format!(
                    "cannot subtract {} from {}",
                    r.type_name(),
                    l.type_name()
                )))
            }
        },
        BinOp::Mod => match (&l, &r) {
            (Value::Num(a), Value::Num(b)) => Value::Num(a % b),
            _ => {
                return Err(EvalError::TypeMismatch(format!(
                    "cannot take {} modulo {}",
                    l.type_name(),
                    r.type_name()
                )))
            }
        },
    };
    Ok(Reference::value(out))
}

/// `<` and `>` order numbers; `==` and `!=` compare the reified forms.
pub(super) fn eval_compare(op: CompareOp, lhs: &Node, rhs: &Node, scope: &Scope) -> Result<Reference, EvalError> {
    let (l, r) = operands(lhs, rhs, scope)?;
    let out = match op {
        CompareOp::Eq => reify_value(&l)? == reify_value(&r)?,
        CompareOp::Ne => reify_value(&l)? != reify_value(&r)?,
        CompareOp::Lt | CompareOp::Gt => match (&l, &r) {
            (Value::Num(a), Value::Num(b)) if op == CompareOp::Lt => a < b,
            (Value::Num(a), Value::Num(b)) => a > b,
            _ => {
                return Err(EvalError::TypeMismatch(format!(
                    "can only compare ({}) Numbers, found {} and {}",
                    op.as_str(),
                    l.type_name(),
                    r.type_name()
                )))
            }
        },
    };
    Ok(Reference::value(Value::Bool(out)))
}

/// `!operand`, Booleans only.
pub(super) fn eval_not(operand: &Node, scope: &Scope) -> Result<Reference, EvalError> {
    match evaluate(operand, scope, true)?.get()? {
        Value::Bool(b) => Ok(Reference::value(Value::Bool(!b))),
        other => Err(EvalError::TypeMismatch(format!(
            "cannot negate {}",
            other.type_name()
        ))),
    }
}
