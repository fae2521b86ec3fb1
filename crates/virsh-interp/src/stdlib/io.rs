// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Standard input namespace (io.*).

use std::io::{self, BufRead};
use std::sync::Arc;

use crate::env::Scope;
use crate::interp::EvalError;
use crate::lazy::Lazy;
use crate::value::{List, Value};

pub(super) fn namespace() -> Scope {
    let io = Scope::new();
    io.define("stdin", Lazy::ready(Value::List(stdin_lines())));
    io
}

/// Trimmed stdin lines as a single-pass list, ending at EOF. A read error is
/// reported once and ends the stream.
fn stdin_lines() -> List {
    let mut done = false;
    List::stream(std::iter::from_fn(move || {
        if done {
            return None;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => {
                done = true;
                None
            }
            Ok(_) => Some(Ok(Lazy::ready(Value::from(line.trim())))),
            Err(e) => {
                done = true;
                Some(Err(EvalError::Io {
                    context: "reading stdin".to_string(),
                    source: Arc::new(e),
                }))
            }
        }
    }))
}
