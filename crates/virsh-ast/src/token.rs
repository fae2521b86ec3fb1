// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use crate::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    /// `'text'`, escapes already processed
    RawString(String),
    /// `"text"`, kept verbatim for interpolation
    Template(String),
    Bool(bool),

    Ident(String),
    /// `/a/b`, `//`, `/`
    Path(String),

    // Keywords
    Else,

    // Operators
    Eq,         // =
    EqEq,       // ==
    BangEq,     // !=
    Lt,         // <
    Gt,         // >
    LeftArrow,  // <-
    Arrow,      // ->
    FatArrow,   // =>
    Plus,       // +
    Minus,      // -
    Percent,    // %
    PlusPlus,   // ++
    MinusMinus, // --
    BangBang,   // !!
    Bang,       // !
    Dot,        // .
    DotDot,     // ..
    Dollar,     // $

    // Delimiters
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Semi,
    Comma,

    Eof,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "a number",
            TokenKind::RawString(_) | TokenKind::Template(_) => "a string",
            TokenKind::Bool(_) => "'true' or 'false'",
            TokenKind::Ident(_) => "a name",
            TokenKind::Path(_) => "a path",
            TokenKind::Else => "'else'",

            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LeftArrow => "'<-'",
            TokenKind::Arrow => "'->'",
            TokenKind::FatArrow => "'=>'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Percent => "'%'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::BangBang => "'!!'",
            TokenKind::Bang => "'!'",
            TokenKind::Dot => "'.'",
            TokenKind::DotDot => "'..'",
            TokenKind::Dollar => "'$'",

            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Semi => "';'",
            TokenKind::Comma => "','",

            TokenKind::Eof => "end of input",
        }
    }

    /// The operator text of a token that may appear in an operator section
    /// such as `(+)`.
    pub fn operator_symbol(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Percent => "%",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::EqEq => "==",
            TokenKind::BangEq => "!=",
            _ => return None,
        })
    }
}
