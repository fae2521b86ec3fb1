// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! virsh CLI - interactive prompt and script runner.

mod commands;
mod help;
mod output;

use std::env;
use std::fs;
use std::process;
use std::sync::Once;

use virsh_ast::LineMap;

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber when `RUST_LOG` is set. Without it the
/// interpreter's events go nowhere.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() {
    output::configure_colors();
    init_tracing();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let io = take_flag(&mut args, "--io");

    let Some(first) = args.first().cloned() else {
        commands::repl::cmd_repl(io);
        return;
    };

    match first.as_str() {
        "repl" => commands::repl::cmd_repl(io),
        "run" => commands::run::cmd_run(require_file(&args, "run"), io),
        "fmt" => commands::phase::cmd_fmt(require_file(&args, "fmt")),
        "lex" => commands::phase::cmd_lex(require_file(&args, "lex")),
        "parse" => commands::phase::cmd_parse(require_file(&args, "parse")),
        "help" | "--help" | "-h" => help::print_usage(),
        "version" | "--version" | "-V" => {
            println!(
                "{} {}",
                output::program("virsh"),
                output::faint(env!("CARGO_PKG_VERSION"))
            );
        }
        flag if flag.starts_with('-') => {
            eprintln!("{}: unknown option '{}'", output::error_tag(), flag);
            eprintln!();
            help::print_usage();
            process::exit(1);
        }
        // A bare path runs the script.
        path => commands::run::cmd_run(path, io),
    }
}

/// Remove every occurrence of `flag`, reporting whether there was one.
fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != flag);
    args.len() != before
}

fn require_file<'a>(args: &'a [String], cmd: &str) -> &'a str {
    match args.get(1) {
        Some(path) => path,
        None => {
            eprintln!(
                "{}: {} {} {}",
                output::heading("Usage"),
                output::cmd("virsh"),
                output::cmd(cmd),
                output::placeholder("<file>")
            );
            process::exit(1);
        }
    }
}

/// Read a script, exiting with an error if it can't be read.
fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: reading {}: {}",
                output::error_tag(),
                output::path(path),
                e
            );
            process::exit(1);
        }
    }
}

/// Print a diagnostic pointing at byte offset `pos` of `source`.
fn show_error(source: &str, pos: usize, message: &str, hint: Option<&str>) {
    let lines = LineMap::new(source);
    let (line_num, col) = lines.locate(pos.min(source.len()));
    let line_text = lines.line_text(source, line_num).unwrap_or("");

    eprintln!("{}: {}", output::error_tag(), message);
    eprintln!("   {} line {}:{}", output::location_arrow(), line_num, col);
    eprintln!("    {}", output::gutter());
    eprintln!("{} {} {}", output::gutter_number(line_num), output::gutter(), line_text);
    eprintln!(
        "    {} {}{}",
        output::gutter(),
        " ".repeat(col.saturating_sub(1)),
        output::marker()
    );
    if let Some(hint) = hint {
        eprintln!("    {}: {}", output::hint_tag(), output::hint_body(hint));
    }
}
