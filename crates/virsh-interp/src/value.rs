// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Runtime values.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use virsh_ast::number_text;

use crate::env::Scope;
use crate::function::Function;
use crate::interp::EvalError;
use crate::lazy::Lazy;

/// A runtime value in the interpreter.
///
/// Values are immutable once built; mutation happens only by replacing what a
/// [`Slot`](crate::lazy::Slot) holds.
#[derive(Clone)]
pub enum Value {
    Num(f64),
    Str(Rc<str>),
    Bool(bool),
    List(List),
    /// An environment; doubles as the record type.
    Scope(Scope),
    Function(Function),
    Undefined,
}

impl Value {
    /// Returns the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "Number",
            Value::Str(_) => "String",
            Value::Bool(_) => "Boolean",
            Value::List(_) => "List",
            Value::Scope(_) => "Scope",
            Value::Function(_) => "Function",
            Value::Undefined => "Undefined",
        }
    }

    /// `false`, `0`, NaN, `""` and Undefined are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Undefined => false,
            Value::List(_) | Value::Scope(_) | Value::Function(_) => true,
        }
    }

    pub fn as_addable(&self) -> Option<&dyn Addable> {
        match self {
            Value::Num(n) => Some(n as &dyn Addable),
            Value::Str(s) => Some(s as &dyn Addable),
            Value::Bool(_)
            | Value::List(_)
            | Value::Scope(_)
            | Value::Function(_)
            | Value::Undefined => None,
        }
    }

    pub fn as_subtractable(&self) -> Option<&dyn Subtractable> {
        match self {
            Value::Num(n) => Some(n as &dyn Subtractable),
            Value::Str(_)
            | Value::Bool(_)
            | Value::List(_)
            | Value::Scope(_)
            | Value::Function(_)
            | Value::Undefined => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "Num({})", number_text(*n)),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::List(_) => f.write_str("List(..)"),
            Value::Scope(scope) => write!(f, "Scope({:?})", scope.names()),
            Value::Function(func) if func.params().is_empty() => {
                write!(f, "Function({})", func.name())
            }
            Value::Function(func) => {
                write!(f, "Function({} {} =>)", func.name(), func.params().join(" "))
            }
            Value::Undefined => f.write_str("Undefined"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Scope> for Value {
    fn from(scope: Scope) -> Self {
        Value::Scope(scope)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// Values that support `+`.
pub trait Addable {
    fn add(&self, rhs: &Value) -> Result<Value, EvalError>;
}

/// Values that support `-`.
pub trait Subtractable {
    fn subtract(&self, rhs: &Value) -> Result<Value, EvalError>;
}

impl Addable for f64 {
    fn add(&self, rhs: &Value) -> Result<Value, EvalError> {
        match rhs {
            Value::Num(r) => Ok(Value::Num(self + r)),
            other => Err(EvalError::TypeMismatch(format!(
                "cannot add {} to Number",
                other.type_name()
            ))),
        }
    }
}

impl Addable for Rc<str> {
    fn add(&self, rhs: &Value) -> Result<Value, EvalError> {
        let tail = match rhs {
            Value::Str(r) => r.to_string(),
            // Numbers are written out on the right of a string, never the reverse.
            Value::Num(r) => number_text(*r),
            other => {
                return Err(EvalError::TypeMismatch(format!(
                    "cannot add {} to String",
                    other.type_name()
                )))
            }
        };
        let mut out = String::with_capacity(self.len() + tail.len());
        out.push_str(self);
        out.push_str(&tail);
        Ok(Value::from(out))
    }
}

impl Subtractable for f64 {
    fn subtract(&self, rhs: &Value) -> Result<Value, EvalError> {
        match rhs {
            Value::Num(r) => Ok(Value::Num(self - r)),
            other => Err(EvalError::TypeMismatch(format!(
                "cannot subtract {} from Number",
                other.type_name()
            ))),
        }
    }
}

// =============================================================================
// Lists
// =============================================================================

/// Items produced by a streaming list.
pub type ItemStream = Box<dyn Iterator<Item = Result<Lazy, EvalError>>>;

/// A sequence of deferred values.
///
/// Materialised lists can be walked any number of times. Streaming lists
/// (such as stdin) are single-pass: every cursor pulls from the same source.
#[derive(Clone)]
pub struct List(Rc<ListSource>);

enum ListSource {
    Items(Vec<Lazy>),
    Stream(RefCell<ItemStream>),
}

impl List {
    pub fn from_items(items: Vec<Lazy>) -> Self {
        List(Rc::new(ListSource::Items(items)))
    }

    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self::from_items(values.into_iter().map(Lazy::ready).collect())
    }

    pub fn stream(items: impl Iterator<Item = Result<Lazy, EvalError>> + 'static) -> Self {
        List(Rc::new(ListSource::Stream(RefCell::new(Box::new(items)))))
    }

    pub fn cursor(&self) -> ListCursor {
        ListCursor {
            list: self.clone(),
            pos: 0,
        }
    }
}

/// External iterator over a [`List`].
pub struct ListCursor {
    list: List,
    pos: usize,
}

impl Iterator for ListCursor {
    type Item = Result<Lazy, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &*self.list.0 {
            ListSource::Items(items) => {
                let item = items.get(self.pos).cloned();
                self.pos += 1;
                item.map(Ok)
            }
            ListSource::Stream(stream) => match stream.try_borrow_mut() {
                Ok(mut stream) => stream.next(),
                Err(_) => Some(Err(EvalError::TypeMismatch(
                    "list is already being read".to_string(),
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_strings_add() {
        let one = Value::Num(1.0);
        let sum = one.as_addable().unwrap().add(&Value::Num(2.0)).unwrap();
        assert!(matches!(sum, Value::Num(n) if n == 3.0));

        let hello = Value::from("HELLO ");
        let joined = hello.as_addable().unwrap().add(&Value::Num(1.0)).unwrap();
        assert!(matches!(joined, Value::Str(s) if &*s == "HELLO 1"));
    }

    #[test]
    fn number_plus_string_is_rejected() {
        let err = Value::Num(1.0).as_addable().unwrap().add(&Value::from("x"));
        assert!(matches!(err, Err(EvalError::TypeMismatch(_))));
    }

    #[test]
    fn only_numbers_subtract() {
        assert!(Value::Num(1.0).as_subtractable().is_some());
        assert!(Value::from("a").as_subtractable().is_none());
        assert!(Value::Bool(true).as_addable().is_none());
        assert!(Value::Undefined.as_addable().is_none());
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Num(0.0).is_truthy());
        assert!(!Value::Num(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Undefined.is_truthy());
        assert!(Value::from("A").is_truthy());
        assert!(Value::List(List::from_values([])).is_truthy());
    }

    #[test]
    fn debug_shows_lambda_parameters() {
        use crate::function::Completion;

        let native = Function::native("head", 1, |_, _| Ok(Completion::value(Value::Undefined)));
        assert_eq!(format!("{:?}", Value::Function(native)), "Function(head)");

        let params = vec!["a".to_string(), "b".to_string()];
        let lambda = Function::with_params("<lambda>", params, |_, _| {
            Ok(Completion::value(Value::Undefined))
        });
        assert_eq!(lambda.arity(), 2);
        assert_eq!(format!("{:?}", Value::Function(lambda)), "Function(<lambda> a b =>)");
    }

    #[test]
    fn materialised_lists_are_multi_pass() {
        let list = List::from_values([Value::Num(1.0), Value::Num(2.0)]);
        assert_eq!(list.cursor().count(), 2);
        assert_eq!(list.cursor().count(), 2);
    }

    #[test]
    fn streams_are_single_pass() {
        let list = List::stream((0..3).map(|n| Ok(Lazy::ready(Value::Num(n as f64)))));
        let mut first = list.cursor();
        assert!(first.next().is_some());
        // A second cursor continues where the first stopped.
        assert_eq!(list.cursor().count(), 2);
        assert!(first.next().is_none());
    }
}
