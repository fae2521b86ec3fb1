// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Front-end inspection commands: lex, parse, fmt.

use std::process;

use virsh_ast::token::TokenKind;

use crate::{output, read_source, show_error};

pub fn cmd_lex(path: &str) {
    let source = read_source(path);
    let result = virsh_lexer::Lexer::new(&source).tokenize();

    for error in &result.errors {
        show_error(&source, error.span.start, &error.message, error.hint.as_deref());
    }

    if result.is_ok() {
        println!("{}\n", output::rule(&format!("Tokens ({})", result.tokens.len())));
        for tok in &result.tokens {
            if tok.kind == TokenKind::Eof {
                continue;
            }
            println!("{:4}:{:<3} {:?}", tok.span.start, tok.span.end, tok.kind);
        }
        println!("\n{}", output::phase_ok(&format!("Lex: {} tokens", result.tokens.len())));
    } else {
        eprintln!("\n{}", output::phase_failed("Lex", result.errors.len()));
        process::exit(1);
    }
}

pub fn cmd_parse(path: &str) {
    let source = read_source(path);
    match virsh_parser::parse(&source) {
        Ok(node) => {
            println!("{}\n", output::rule("AST"));
            println!("{:#?}", node);
            println!();
            println!("{} {}", output::faint("recompiled:"), virsh_fmt::recompile(&node));
            println!("\n{}", output::phase_ok("Parse"));
        }
        Err(e) => {
            show_error(&source, e.span.start, &e.message, e.hint.as_deref());
            eprintln!("\n{}", output::phase_failed("Parse", 1));
            process::exit(1);
        }
    }
}

/// Print the formatted script. Unparseable input is an error rather than
/// being echoed back.
pub fn cmd_fmt(path: &str) {
    let source = read_source(path);
    if let Err(e) = virsh_parser::parse(&source) {
        show_error(&source, e.span.start, &e.message, e.hint.as_deref());
        process::exit(1);
    }
    print!("{}", virsh_fmt::format_source(&source));
}
