// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lists, records, ranges and indexing.

use std::rc::Rc;

use virsh_ast::{Field, Node};

use crate::env::Scope;
use crate::lazy::Reference;
use crate::reify::reify_value;
use crate::value::{List, Value};

use super::{evaluate, EvalError};

/// `(a, b, c)`: elements are evaluated and forced left to right.
pub(super) fn eval_list(items: &[Rc<Node>], scope: &Scope) -> Result<Reference, EvalError> {
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        values.push(evaluate(item, scope, true)?.get()?);
    }
    Ok(Reference::value(Value::List(List::from_values(values))))
}

/// `{k: v, ...}`: a parentless scope. Values are evaluated in the
/// surrounding scope and stored unforced.
pub(super) fn eval_record(fields: &[Field], scope: &Scope) -> Result<Reference, EvalError> {
    let record = Scope::new();
    for field in fields {
        let value = evaluate(&field.value, scope, true)?;
        record.define(field.key.as_str(), value.lazy());
    }
    Ok(Reference::value(Value::Scope(record)))
}

/// `from..to`, inclusive, stepping by one.
pub(super) fn eval_range(from: &Node, to: &Node, scope: &Scope) -> Result<Reference, EvalError> {
    let start = number(evaluate(from, scope, true)?.get()?, "range start")?;
    let end = number(evaluate(to, scope, true)?.get()?, "range end")?;
    let mut values = Vec::new();
    let mut n = start;
    while n <= end {
        values.push(Value::Num(n));
        n += 1.0;
    }
    Ok(Reference::value(Value::List(List::from_values(values))))
}

/// `target[index]`.
///
/// Lists are scanned from the front; a position past the end (or one that
/// is not a whole number) yields Undefined. Scopes use the index's text as
/// a key and hand back the slot, so `record[key] = v` works.
pub(super) fn eval_index(target: &Node, index: &Node, scope: &Scope) -> Result<Reference, EvalError> {
    let base = evaluate(target, scope, true)?.get()?;
    let key = evaluate(index, scope, true)?.get()?;
    match base {
        Value::List(list) => {
            let Value::Num(n) = key else {
                return Err(EvalError::TypeMismatch(format!(
                    "list index must be a Number, found {}",
                    key.type_name()
                )));
            };
            if n < 0.0 || n.fract() != 0.0 {
                return Ok(Reference::undefined());
            }
            match list.cursor().nth(n as usize) {
                Some(item) => Ok(Reference::ReadOnly(item?)),
                None => Ok(Reference::undefined()),
            }
        }
        Value::Scope(record) => {
            let key = reify_value(&key)?.to_string();
            Ok(Reference::ReadWrite(record.get(&key)))
        }
        other => Err(EvalError::TypeMismatch(format!(
            "cannot index {}",
            other.type_name()
        ))),
    }
}

fn number(value: Value, what: &str) -> Result<f64, EvalError> {
    match value {
        Value::Num(n) => Ok(n),
        other => Err(EvalError::TypeMismatch(format!(
            "{} must be a Number, found {}",
            what,
            other.type_name()
        ))),
    }
}
