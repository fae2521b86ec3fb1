// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal styling for diagnostics, banners, the usage screen and the REPL.

use colored::{ColoredString, Colorize};

/// `NO_COLOR` wins over `FORCE_COLOR`; with neither set, `colored` decides
/// from the terminal.
pub fn configure_colors() {
    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    } else if std::env::var_os("FORCE_COLOR").is_some() {
        colored::control::set_override(true);
    }
}

// Diagnostics: `error: msg`, `--> line l:c`, a gutter with the source line,
// a marker under the column and an optional `= hint:` line.

pub fn error_tag() -> ColoredString {
    "error".red().bold()
}

pub fn location_arrow() -> ColoredString {
    "-->".blue()
}

pub fn gutter() -> ColoredString {
    "|".blue()
}

pub fn gutter_number(line: usize) -> ColoredString {
    format!("{:3}", line).blue().bold()
}

pub fn marker() -> ColoredString {
    "^".red().bold()
}

pub fn hint_tag() -> String {
    format!("{} {}", "=".cyan(), "hint".cyan())
}

pub fn hint_body(text: &str) -> ColoredString {
    text.dimmed()
}

/// `=== Lex: 12 tokens OK ===` after `virsh lex` / `virsh parse`.
pub fn phase_ok(what: &str) -> String {
    let rule = "===".dimmed();
    format!("{} {} {}", rule, format!("{} OK", what).green().bold(), rule)
}

pub fn phase_failed(what: &str, errors: usize) -> String {
    let rule = "===".dimmed();
    let noun = if errors == 1 { "error" } else { "errors" };
    let msg = format!("{} FAILED: {} {}", what, errors, noun);
    format!("{} {} {}", rule, msg.red().bold(), rule)
}

/// Section rule for inspection dumps, e.g. `=== AST ===`.
pub fn rule(title: &str) -> String {
    format!("{} {} {}", "===".dimmed(), title, "===".dimmed())
}

// Usage screen.

pub fn program(name: &str) -> ColoredString {
    name.bold()
}

pub fn heading(text: &str) -> ColoredString {
    text.yellow().bold()
}

pub fn cmd(name: &str) -> ColoredString {
    name.green()
}

pub fn placeholder(text: &str) -> ColoredString {
    text.cyan()
}

pub fn faint(text: &str) -> ColoredString {
    text.dimmed()
}

pub fn path(p: &str) -> ColoredString {
    p.underline()
}

/// REPL echo for a line that evaluated to nothing.
pub fn undefined() -> ColoredString {
    "undefined".dimmed()
}
