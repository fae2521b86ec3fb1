// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `print` and `write`.

use crate::function::{Completion, Function};
use crate::output::Output;
use crate::reify::reify_value;
use crate::value::Value;

pub(super) fn functions(output: &Output) -> Vec<Function> {
    vec![
        text_sink("print", "\n", output.clone()),
        text_sink("write", "", output.clone()),
    ]
}

/// Forces each argument in turn and writes its text followed by `end`.
fn text_sink(name: &'static str, end: &'static str, output: Output) -> Function {
    Function::native(name, 1, move |_scope, args| {
        for arg in args {
            let text = reify_value(&arg.force()?.resolve()?)?.to_string();
            output.write(&(text + end))?;
        }
        Ok(Completion::value(Value::Undefined))
    })
}
