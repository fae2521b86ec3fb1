// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Syntax tree nodes.

use std::rc::Rc;

use crate::Span;

/// A node in the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }
}

/// The kind of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Number(f64),
    Bool(bool),
    /// Single-quoted string; no interpolation.
    RawString(String),
    /// Double-quoted string; the raw text between the quotes, interpolated
    /// at evaluation time.
    Template(String),
    /// A bare name.
    Reference(String),
    /// A slash-prefixed name such as `/a` or `//okay`, bound like any other
    /// name.
    Path(String),

    /// `target = value`
    Assign { target: Rc<Node>, value: Rc<Node> },
    /// `target.member` or `target->member`
    Look {
        target: Rc<Node>,
        op: LookOp,
        member: String,
    },
    /// `target[index]`
    Index { target: Rc<Node>, index: Rc<Node> },

    /// `{ a; b }`, evaluated in a fresh child scope.
    Block(Vec<Rc<Node>>),
    /// `(a; b)`, evaluated in the current scope.
    Paren(Vec<Rc<Node>>),
    /// Top-level statements of a program.
    Sequence(Vec<Rc<Node>>),
    /// `(a, b)` or `(a,)`
    List(Vec<Rc<Node>>),
    /// `{ key: value, ... }`
    Record(Vec<Field>),

    /// `callee arg1 arg2 ...`
    Call { callee: Rc<Node>, args: Vec<Rc<Node>> },
    /// `target++`, `target--`, `target!!`
    Postfix { target: Rc<Node>, op: PostfixOp },
    Binary {
        op: BinOp,
        lhs: Rc<Node>,
        rhs: Rc<Node>,
    },
    Compare {
        op: CompareOp,
        lhs: Rc<Node>,
        rhs: Rc<Node>,
    },
    /// `from..to`, inclusive.
    Range { from: Rc<Node>, to: Rc<Node> },
    /// `name <- source`
    Take { name: String, source: Rc<Node> },
    /// `a b => body`
    Function { params: Vec<String>, body: Rc<Node> },
    /// `!operand`
    Not(Rc<Node>),
    /// An operator section such as `(+)`. Parsed but not evaluable.
    Operator(String),
}

/// A `key: value` entry of a record literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Rc<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookOp {
    Dot,
    Arrow,
}

impl LookOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LookOp::Dot => ".",
            LookOp::Arrow => "->",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Inc,
    Dec,
    Flip,
}

impl PostfixOp {
    pub fn as_str(self) -> &'static str {
        match self {
            PostfixOp::Inc => "++",
            PostfixOp::Dec => "--",
            PostfixOp::Flip => "!!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mod,
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mod => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Gt,
    Eq,
    Ne,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }
}

/// Text of a number as it appears in source and in program output:
/// integral values print without a fractional part.
pub fn number_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n + 0.0)
    } else {
        n.to_string()
    }
}
