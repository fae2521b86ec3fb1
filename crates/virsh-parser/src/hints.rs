// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use virsh_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on context.
pub fn for_expected(expected: &str, found: &TokenKind) -> Option<&'static str> {
    match (expected, found) {
        // Block and record hints
        ("'}'", TokenKind::Eof) => Some("every '{' needs a matching '}'"),
        ("'}'", TokenKind::Comma) => Some("separate statements with ';', record fields with ','"),
        ("':'", _) => Some("record fields are written as key: value"),

        // Parentheses hints
        ("')'", TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        ("')'", TokenKind::Comma | TokenKind::Semi) => {
            Some("use only ',' (a list) or only ';' (a sequence) inside one pair of parentheses")
        }

        // Bracket hints
        ("']'", TokenKind::Eof) => Some("add ']' to close the index"),

        // Expression hints
        ("expression", TokenKind::Eq) => Some("put the value after '='"),
        ("expression", TokenKind::Semi) => Some("statement is incomplete"),
        ("expression", TokenKind::Eof) => Some("statement is incomplete"),
        ("expression", TokenKind::RParen) => Some("'()' is only valid before '=>'"),
        ("expression", _) => Some("try a value, a name, or a call"),

        // Name hints
        ("a name", TokenKind::Number(_)) => Some("names can't start with a number"),
        ("a name", _) => Some("members are named with a letter or '_'"),

        // Statement separator
        ("';'", TokenKind::Comma) => Some("wrap comma-separated items in parentheses to build a list"),
        ("';'", _) => Some("separate statements with ';'"),

        _ => None,
    }
}
