// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Evaluate a script file.

use std::process;

use virsh_interp::Reified;

use crate::read_source;

/// Evaluate `path` and print its result unless it is undefined.
/// Exits with status 1 on any error.
pub fn cmd_run(path: &str, io: bool) {
    let source = read_source(path);
    tracing::debug!(path, io, "running script");

    let interp = super::interpreter(io);
    match super::evaluate(&interp, &source) {
        Some(Reified::Absent) => {}
        Some(value) => println!("{}", value),
        None => process::exit(1),
    }
}
