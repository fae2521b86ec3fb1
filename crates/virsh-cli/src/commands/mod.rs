// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Command implementations for the virsh CLI.

pub mod phase;
pub mod repl;
pub mod run;

use virsh_interp::{Interpreter, Reified};

use crate::{output, show_error};

/// The interpreter a command runs with; `--io` adds `fs` and `io`.
pub fn interpreter(io: bool) -> Interpreter {
    if io {
        Interpreter::with_io()
    } else {
        Interpreter::new()
    }
}

/// Parse and evaluate `source`, printing any error to stderr.
///
/// The program is parsed up front so syntax errors can point into
/// `source`. Errors raised later (including parse errors inside an
/// interpolated string) are reported on one line.
pub fn evaluate(interp: &Interpreter, source: &str) -> Option<Reified> {
    let node = match virsh_parser::parse(source) {
        Ok(node) => node,
        Err(e) => {
            show_error(source, e.span.start, &e.message, e.hint.as_deref());
            return None;
        }
    };
    match interp
        .eval_node(&node)
        .and_then(|r| virsh_interp::reify(&r))
    {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("{}: {}", output::error_tag(), e);
            None
        }
    }
}
