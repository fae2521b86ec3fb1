// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Interactive prompt.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use virsh_interp::Reified;

use crate::output;

const PROMPT: &str = "> ";

/// Read-eval-print loop over one interpreter, so bindings persist between
/// lines. Ctrl-C drops the current line, Ctrl-D exits.
pub fn cmd_repl(io: bool) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("{}: cannot start line editor: {}", output::error_tag(), e);
            std::process::exit(1);
        }
    };
    let interp = super::interpreter(io);
    tracing::debug!(io, "repl started");

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                match super::evaluate(&interp, &line) {
                    Some(Reified::Absent) => println!("{}", output::undefined()),
                    Some(value) => println!("{}", value),
                    None => {}
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {}", output::error_tag(), e);
                break;
            }
        }
    }
}
