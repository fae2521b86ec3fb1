// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the virsh language.
//!
//! Transforms a token stream into a syntax tree.

mod hints;
mod parser;

pub use parser::{ParseError, ParseResult, Parser};

use virsh_ast::Node;

/// Lex and parse a whole program. The root is always a `Sequence`.
///
/// Stops at the first lexical or syntax error.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let lexed = virsh_lexer::Lexer::new(source).tokenize();
    if let Some(err) = lexed.errors.into_iter().next() {
        return Err(err.into());
    }
    Parser::new(lexed.tokens).parse_program()
}
