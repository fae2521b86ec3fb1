// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser implementation: recursive descent, one function per
//! precedence level.

use std::rc::Rc;

use virsh_ast::token::{Token, TokenKind};
use virsh_ast::{BinOp, CompareOp, Field, LookOp, Node, NodeKind, PostfixOp, Span};
use virsh_lexer::LexError;

/// The parser for virsh source text.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the most recently consumed token.
    prev_end: usize,
}

pub type ParseResult<T> = Result<T, ParseError>;

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::new(end, end),
            });
        }
        Self {
            tokens,
            pos: 0,
            prev_end: 0,
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.at_end() {
            self.pos += 1;
        }
        self.prev_end = token.span.end;
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(kind.display_name()))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.current_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_expected("a name")),
        }
    }

    fn error_expected(&self, expected: &str) -> ParseError {
        ParseError::expected(expected, self.current_kind(), self.current().span)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse a whole program: `;`-separated statements up to end of input.
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        let items = self.parse_statements(&TokenKind::Eof)?;
        if !self.at_end() {
            return Err(self.error_expected("';'"));
        }
        let end = self.current().span.end;
        Ok(Node::new(NodeKind::Sequence(items), Span::new(0, end)))
    }

    /// Statements separated by one or more `;`, stopping before `end`.
    fn parse_statements(&mut self, end: &TokenKind) -> ParseResult<Vec<Rc<Node>>> {
        let mut items = Vec::new();
        while self.match_token(&TokenKind::Semi) {}
        while !self.check(end) && !self.at_end() {
            items.push(Rc::new(self.parse_statement()?));
            if !self.match_token(&TokenKind::Semi) {
                break;
            }
            while self.match_token(&TokenKind::Semi) {}
        }
        Ok(items)
    }

    pub fn parse_statement(&mut self) -> ParseResult<Node> {
        self.parse_assign()
    }

    /// `lhs = rhs`, right-associative. Any expression is accepted on the
    /// left; the evaluator rejects targets it cannot write to.
    fn parse_assign(&mut self) -> ParseResult<Node> {
        let target = self.parse_function()?;
        if self.match_token(&TokenKind::Eq) {
            let value = self.parse_assign()?;
            let span = target.span.to(value.span);
            return Ok(Node::new(
                NodeKind::Assign {
                    target: Rc::new(target),
                    value: Rc::new(value),
                },
                span,
            ));
        }
        Ok(target)
    }

    /// `params => body`
    fn parse_function(&mut self) -> ParseResult<Node> {
        let start = self.current().span.start;

        if self.check(&TokenKind::LParen)
            && matches!(self.peek(1), TokenKind::RParen)
            && matches!(self.peek(2), TokenKind::FatArrow)
        {
            self.advance();
            self.advance();
            self.advance();
            let body = self.parse_function()?;
            let span = self.span_from(start);
            return Ok(Node::new(
                NodeKind::Function {
                    params: Vec::new(),
                    body: Rc::new(body),
                },
                span,
            ));
        }

        let head = self.parse_call()?;
        if !self.check(&TokenKind::FatArrow) {
            return Ok(head);
        }
        self.advance();

        let mut params = Vec::new();
        collect_params(&head, &mut params)?;
        let body = self.parse_function()?;
        let span = head.span.to(body.span);
        Ok(Node::new(
            NodeKind::Function {
                params,
                body: Rc::new(body),
            },
            span,
        ))
    }

    /// Call by juxtaposition: `callee arg1 arg2 ...`.
    fn parse_call(&mut self) -> ParseResult<Node> {
        let callee = self.parse_take()?;
        let mut args = Vec::new();

        loop {
            match self.current_kind() {
                // Noise word between branches: `if c { a } else { b }`
                TokenKind::Else => {
                    self.advance();
                }
                // `f a $ g b` is `f a (g b)`
                TokenKind::Dollar => {
                    self.advance();
                    args.push(Rc::new(self.parse_call()?));
                    break;
                }
                kind if starts_argument(kind) => {
                    args.push(Rc::new(self.parse_take()?));
                }
                _ => break,
            }
        }

        if args.is_empty() {
            return Ok(callee);
        }
        let span = self.span_from(callee.span.start);
        Ok(Node::new(
            NodeKind::Call {
                callee: Rc::new(callee),
                args,
            },
            span,
        ))
    }

    /// Generator binding `name <- source`, right-associative.
    fn parse_take(&mut self) -> ParseResult<Node> {
        if let (TokenKind::Ident(name), TokenKind::LeftArrow) = (self.current_kind(), self.peek(1)) {
            let name = name.clone();
            let start = self.current().span.start;
            self.advance();
            self.advance();
            let source = self.parse_take()?;
            let span = self.span_from(start);
            return Ok(Node::new(
                NodeKind::Take {
                    name,
                    source: Rc::new(source),
                },
                span,
            ));
        }
        self.parse_compare()
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn parse_compare(&mut self) -> ParseResult<Node> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Lt => CompareOp::Lt,
                TokenKind::Gt => CompareOp::Gt,
                TokenKind::EqEq => CompareOp::Eq,
                TokenKind::BangEq => CompareOp::Ne,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_additive()?;
            let span = lhs.span.to(rhs.span);
            lhs = Node::new(
                NodeKind::Compare {
                    op,
                    lhs: Rc::new(lhs),
                    rhs: Rc::new(rhs),
                },
                span,
            );
        }
    }

    fn parse_additive(&mut self) -> ParseResult<Node> {
        let mut lhs = self.parse_modulo()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_modulo()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn parse_modulo(&mut self) -> ParseResult<Node> {
        let mut lhs = self.parse_range()?;
        while self.match_token(&TokenKind::Percent) {
            let rhs = self.parse_range()?;
            lhs = binary(BinOp::Mod, lhs, rhs);
        }
        Ok(lhs)
    }

    /// `from..to`
    fn parse_range(&mut self) -> ParseResult<Node> {
        let from = self.parse_prefix()?;
        if !self.check(&TokenKind::DotDot) {
            return Ok(from);
        }
        check_range_bound(&from)?;
        self.advance();
        let to = self.parse_prefix()?;
        check_range_bound(&to)?;
        let span = from.span.to(to.span);
        Ok(Node::new(
            NodeKind::Range {
                from: Rc::new(from),
                to: Rc::new(to),
            },
            span,
        ))
    }

    fn parse_prefix(&mut self) -> ParseResult<Node> {
        if self.check(&TokenKind::Bang) {
            let start = self.advance().span.start;
            let operand = self.parse_prefix()?;
            let span = self.span_from(start);
            return Ok(Node::new(NodeKind::Not(Rc::new(operand)), span));
        }
        self.parse_postfix()
    }

    /// `.name`, `->name`, `[index]`, `++`, `--`, `!!`
    fn parse_postfix(&mut self) -> ParseResult<Node> {
        let mut node = self.parse_atom()?;
        loop {
            let start = node.span.start;
            node = match self.current_kind() {
                TokenKind::Dot | TokenKind::Arrow => {
                    let op = if self.check(&TokenKind::Dot) {
                        LookOp::Dot
                    } else {
                        LookOp::Arrow
                    };
                    self.advance();
                    let member = self.expect_ident()?;
                    Node::new(
                        NodeKind::Look {
                            target: Rc::new(node),
                            op,
                            member,
                        },
                        self.span_from(start),
                    )
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_statement()?;
                    self.expect(&TokenKind::RBracket)?;
                    Node::new(
                        NodeKind::Index {
                            target: Rc::new(node),
                            index: Rc::new(index),
                        },
                        self.span_from(start),
                    )
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus | TokenKind::BangBang => {
                    let op = match self.advance().kind {
                        TokenKind::PlusPlus => PostfixOp::Inc,
                        TokenKind::MinusMinus => PostfixOp::Dec,
                        _ => PostfixOp::Flip,
                    };
                    Node::new(
                        NodeKind::Postfix {
                            target: Rc::new(node),
                            op,
                        },
                        self.span_from(start),
                    )
                }
                _ => return Ok(node),
            };
        }
    }

    // =========================================================================
    // Atoms
    // =========================================================================

    fn parse_atom(&mut self) -> ParseResult<Node> {
        let token = self.current().clone();
        let kind = match token.kind {
            TokenKind::Number(n) => NodeKind::Number(n),
            TokenKind::Bool(b) => NodeKind::Bool(b),
            TokenKind::RawString(s) => NodeKind::RawString(s),
            TokenKind::Template(s) => NodeKind::Template(s),
            TokenKind::Ident(name) => NodeKind::Reference(name),
            TokenKind::Path(path) => NodeKind::Path(path),
            TokenKind::LBrace => return self.parse_brace(),
            TokenKind::LParen => return self.parse_paren(),
            _ => return Err(self.error_expected("expression")),
        };
        self.advance();
        Ok(Node::new(kind, token.span))
    }

    /// `{ a; b }` is a block, `{}` and `{ key: value, ... }` are records.
    fn parse_brace(&mut self) -> ParseResult<Node> {
        let start = self.expect(&TokenKind::LBrace)?.span.start;

        let is_record = matches!(self.current_kind(), TokenKind::RBrace)
            || (record_key(self.current_kind()).is_some()
                && matches!(self.peek(1), TokenKind::Colon));

        if !is_record {
            let items = self.parse_statements(&TokenKind::RBrace)?;
            self.expect(&TokenKind::RBrace)?;
            return Ok(Node::new(NodeKind::Block(items), self.span_from(start)));
        }

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let key = match record_key(self.current_kind()) {
                Some(key) => key,
                None => return Err(self.error_expected("a name")),
            };
            self.advance();
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_statement()?;
            fields.push(Field {
                key,
                value: Rc::new(value),
            });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Node::new(NodeKind::Record(fields), self.span_from(start)))
    }

    /// Grouping `(a)`, sequence `(a; b)`, list `(a, b)` / `(a,)`, or an
    /// operator section `(+)`.
    fn parse_paren(&mut self) -> ParseResult<Node> {
        let start = self.expect(&TokenKind::LParen)?.span.start;

        if let Some(symbol) = self.current_kind().operator_symbol() {
            if matches!(self.peek(1), TokenKind::RParen) {
                self.advance();
                self.advance();
                return Ok(Node::new(
                    NodeKind::Operator(symbol.to_string()),
                    self.span_from(start),
                ));
            }
        }

        let first = Rc::new(self.parse_statement()?);

        if self.check(&TokenKind::Comma) {
            let mut items = vec![first];
            while self.match_token(&TokenKind::Comma) {
                if self.check(&TokenKind::RParen) {
                    break;
                }
                items.push(Rc::new(self.parse_statement()?));
            }
            self.expect(&TokenKind::RParen)?;
            return Ok(Node::new(NodeKind::List(items), self.span_from(start)));
        }

        let mut items = vec![first];
        while self.match_token(&TokenKind::Semi) {
            if self.check(&TokenKind::RParen) {
                break;
            }
            items.push(Rc::new(self.parse_statement()?));
        }
        self.expect(&TokenKind::RParen)?;
        Ok(Node::new(NodeKind::Paren(items), self.span_from(start)))
    }
}

fn binary(op: BinOp, lhs: Node, rhs: Node) -> Node {
    let span = lhs.span.to(rhs.span);
    Node::new(
        NodeKind::Binary {
            op,
            lhs: Rc::new(lhs),
            rhs: Rc::new(rhs),
        },
        span,
    )
}

/// Tokens that can begin a juxtaposed call argument.
fn starts_argument(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Number(_)
            | TokenKind::RawString(_)
            | TokenKind::Template(_)
            | TokenKind::Bool(_)
            | TokenKind::Ident(_)
            | TokenKind::Path(_)
            | TokenKind::LBrace
            | TokenKind::LParen
            | TokenKind::Bang
    )
}

fn record_key(kind: &TokenKind) -> Option<String> {
    match kind {
        TokenKind::Ident(s) | TokenKind::RawString(s) | TokenKind::Template(s) => Some(s.clone()),
        _ => None,
    }
}

/// Flatten the left side of `=>` into parameter names: `a`, `a b c`,
/// `(a, b)` and `(a)` are accepted.
fn collect_params(node: &Node, out: &mut Vec<String>) -> ParseResult<()> {
    match &node.kind {
        NodeKind::Reference(name) => out.push(name.clone()),
        NodeKind::Call { callee, args } => {
            collect_params(callee, out)?;
            for arg in args {
                collect_params(arg, out)?;
            }
        }
        NodeKind::List(items) => {
            for item in items {
                collect_params(item, out)?;
            }
        }
        NodeKind::Paren(items) if items.len() == 1 => collect_params(&items[0], out)?,
        _ => {
            return Err(ParseError {
                span: node.span,
                message: "Expected parameter names before '=>'".to_string(),
                hint: Some("write parameters as `a b => ...` or `(a, b) => ...`".to_string()),
            })
        }
    }
    Ok(())
}

fn check_range_bound(node: &Node) -> ParseResult<()> {
    if let NodeKind::Path(path) = &node.kind {
        return Err(ParseError {
            span: node.span,
            message: format!("Path '{}' cannot bound a range", path),
            hint: Some("ranges run between numbers, like 0..10".to_string()),
        });
    }
    Ok(())
}

/// A parse error with location and friendly message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    fn expected(expected: &str, found: &TokenKind, span: Span) -> Self {
        let message = format_expected_message(expected, found);
        let hint = crate::hints::for_expected(expected, found).map(String::from);
        Self {
            span,
            message,
            hint,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            span: err.span,
            message: err.message,
            hint: err.hint,
        }
    }
}

/// Format a user-friendly "expected X, found Y" message.
fn format_expected_message(expected: &str, found: &TokenKind) -> String {
    match expected {
        "';'" => format!("Expected ';' between statements, found {}", found.display_name()),
        "'}'" => {
            if matches!(found, TokenKind::Eof) {
                "Unclosed '{' - missing '}'".to_string()
            } else {
                format!("Expected '}}' to close block, found {}", found.display_name())
            }
        }
        "')'" => {
            if matches!(found, TokenKind::Eof) {
                "Unclosed '(' - missing ')'".to_string()
            } else {
                format!("Expected ')', found {}", found.display_name())
            }
        }
        "']'" => {
            if matches!(found, TokenKind::Eof) {
                "Unclosed '[' - missing ']'".to_string()
            } else {
                format!("Expected ']', found {}", found.display_name())
            }
        }
        "a name" => format!("Expected name, found {}", found.display_name()),
        "expression" => format!("Expected expression, found {}", found.display_name()),
        _ => format!("Expected {}, found {}", expected, found.display_name()),
    }
}
