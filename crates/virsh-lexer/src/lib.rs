// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for the virsh language.
//!
//! Tokenizes source text into a stream of tokens for the parser.

mod lexer;

pub use lexer::{LexError, LexResult, Lexer};
