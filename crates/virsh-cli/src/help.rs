// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text for CLI commands.

use crate::output;

pub fn print_usage() {
    println!(
        "{} {} - a small lazy expression language",
        output::program("virsh"),
        output::faint(env!("CARGO_PKG_VERSION"))
    );
    println!();
    println!(
        "{}: {} {} {}",
        output::heading("Usage"),
        output::cmd("virsh"),
        output::placeholder("[--io]"),
        output::placeholder("[command] [file]")
    );
    println!();
    println!("{}", output::heading("Commands:"));
    println!("  {}                Start the interactive prompt (default)", output::cmd("repl"));
    println!("  {} {}      Evaluate a script and print its result", output::cmd("run"), output::placeholder("<file>"));
    println!("  {} {}      Print the formatted source", output::cmd("fmt"), output::placeholder("<file>"));
    println!("  {}             Show this help", output::cmd("help"));
    println!("  {}          Show version", output::cmd("version"));
    println!();
    println!("{}", output::heading("Debug:"));
    println!("  {} {}      Dump the token stream", output::cmd("lex"), output::placeholder("<file>"));
    println!("  {} {}    Dump the syntax tree", output::cmd("parse"), output::placeholder("<file>"));
    println!();
    println!("{}", output::heading("Options:"));
    println!("  {}              Expose the {} and {} namespaces", output::placeholder("--io"), output::cmd("fs"), output::cmd("io"));
    println!();
    println!(
        "Running {} {} is the same as {} {} {}.",
        output::cmd("virsh"),
        output::placeholder("<file>"),
        output::cmd("virsh"),
        output::cmd("run"),
        output::placeholder("<file>")
    );
    println!("Set {} (e.g. {}) to log evaluation to stderr.", output::placeholder("RUST_LOG"), output::placeholder("virsh_interp=trace"));
}
