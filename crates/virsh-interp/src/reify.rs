// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversion of runtime values into plain host data.

use std::fmt;

use indexmap::IndexMap;
use virsh_ast::number_text;

use crate::interp::EvalError;
use crate::lazy::Reference;
use crate::value::Value;

/// Nesting beyond this is treated as a cycle.
const MAX_DEPTH: usize = 256;

/// A fully forced, host-native copy of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Reified {
    Number(f64),
    String(String),
    Bool(bool),
    List(Vec<Reified>),
    Map(IndexMap<String, Reified>),
    Function,
    Absent,
}

impl fmt::Display for Reified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reified::Number(n) => f.write_str(&number_text(*n)),
            Reified::String(s) => f.write_str(s),
            Reified::Bool(b) => write!(f, "{}", b),
            Reified::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Reified::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Reified::Function => f.write_str("[Function]"),
            Reified::Absent => f.write_str("undefined"),
        }
    }
}

/// Force a reference and convert what it holds.
pub fn reify(reference: &Reference) -> Result<Reified, EvalError> {
    reify_value(&reference.get()?)
}

/// Convert a value, forcing every pending element it contains. A scope
/// contributes only its own bindings, not its parents'.
pub fn reify_value(value: &Value) -> Result<Reified, EvalError> {
    reify_at(value, 0)
}

fn reify_at(value: &Value, depth: usize) -> Result<Reified, EvalError> {
    if depth > MAX_DEPTH {
        return Err(EvalError::TypeMismatch(
            "value is nested too deeply to display (is it cyclic?)".to_string(),
        ));
    }
    Ok(match value {
        Value::Num(n) => Reified::Number(*n),
        Value::Str(s) => Reified::String(s.to_string()),
        Value::Bool(b) => Reified::Bool(*b),
        Value::List(list) => {
            let mut items = Vec::new();
            for item in list.cursor() {
                items.push(reify_at(&item?.resolve()?, depth + 1)?);
            }
            Reified::List(items)
        }
        Value::Scope(scope) => {
            let mut entries = IndexMap::new();
            for (name, slot) in scope.bindings() {
                entries.insert(name, reify_at(&slot.get().resolve()?, depth + 1)?);
            }
            Reified::Map(entries)
        }
        Value::Function(_) => Reified::Function,
        Value::Undefined => Reified::Absent,
    })
}
