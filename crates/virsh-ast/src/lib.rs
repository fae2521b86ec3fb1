// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Syntax tree types for the virsh expression language.
//!
//! This crate defines the tokens and nodes shared between the lexer, parser,
//! recompiler, and evaluator. The tree is produced once by the parser and
//! consumed read-only afterwards; children are reference counted so closures
//! and deferred call arguments can keep the sub-trees they need alive.

pub mod node;
pub mod span;
pub mod token;

pub use node::{number_text, BinOp, CompareOp, Field, LookOp, Node, NodeKind, PostfixOp};
pub use span::{LineMap, Span};
