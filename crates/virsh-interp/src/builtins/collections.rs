// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `list` and `head`.

use crate::function::{Completion, Function};
use crate::lazy::Lazy;
use crate::value::{List, Value};

use super::{expected, force_arg};

pub(super) fn functions() -> Vec<Function> {
    vec![
        Function::native("list", 1, |_scope, args| {
            let mut items = Vec::with_capacity(args.len());
            for arg in args {
                items.push(Lazy::ready(arg.force()?.resolve()?));
            }
            Ok(Completion::value(List::from_items(items)))
        }),
        Function::native("head", 1, |_scope, args| {
            let list = match force_arg(args, 0)? {
                Value::List(list) => list,
                other => return Err(expected("head", "a List", &other)),
            };
            match list.cursor().next() {
                Some(first) => Ok(Completion::Value(first?)),
                None => Ok(Completion::value(Value::Undefined)),
            }
        }),
    ]
}
