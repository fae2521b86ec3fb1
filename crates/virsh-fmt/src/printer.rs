// SPDX-License-Identifier: (MIT OR Apache-2.0)

use virsh_ast::{number_text, Node, NodeKind};

use crate::comment::CommentList;

/// Structural printer: turns a syntax tree back into single-line source.
///
/// Grouping survives because the parser keeps parentheses as `Paren` nodes,
/// so no precedence analysis is needed beyond call arguments.
pub struct Printer {
    output: String,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    // --- Helpers ---

    fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn emit_joined(&mut self, items: &[std::rc::Rc<Node>], sep: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.emit(sep);
            }
            self.node(item);
        }
    }

    // --- Program layout ---

    /// One top-level statement per line, with `#` comments kept in front of
    /// the statement they precede.
    pub fn format_program(&mut self, root: &Node, comments: &mut CommentList) {
        let NodeKind::Sequence(items) = &root.kind else {
            self.node(root);
            self.emit("\n");
            return;
        };
        for (i, item) in items.iter().enumerate() {
            for c in comments.take_before(item.span.end) {
                self.emit(&c.text);
                self.emit("\n");
            }
            self.node(item);
            if i + 1 < items.len() {
                self.emit(";");
            }
            self.emit("\n");
        }
        for c in comments.take_rest() {
            self.emit(&c.text);
            self.emit("\n");
        }
    }

    // --- Nodes ---

    pub fn node(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Number(n) => self.emit(&number_text(*n)),
            NodeKind::Bool(b) => self.emit(if *b { "true" } else { "false" }),
            NodeKind::RawString(s) => {
                self.emit("'");
                self.emit(&escape_raw(s));
                self.emit("'");
            }
            NodeKind::Template(s) => {
                self.emit("\"");
                self.emit(s);
                self.emit("\"");
            }
            NodeKind::Reference(name) | NodeKind::Path(name) => self.emit(name),
            NodeKind::Assign { target, value } => {
                self.node(target);
                self.emit(" = ");
                self.node(value);
            }
            NodeKind::Look { target, op, member } => {
                self.node(target);
                self.emit(op.as_str());
                self.emit(member);
            }
            NodeKind::Index { target, index } => {
                self.node(target);
                self.emit("[");
                self.node(index);
                self.emit("]");
            }
            NodeKind::Block(items) => {
                if items.is_empty() {
                    self.emit("{ }");
                } else {
                    self.emit("{ ");
                    self.emit_joined(items, "; ");
                    self.emit(" }");
                }
            }
            NodeKind::Paren(items) => {
                self.emit("(");
                self.emit_joined(items, "; ");
                self.emit(")");
            }
            NodeKind::Sequence(items) => self.emit_joined(items, "; "),
            NodeKind::List(items) => {
                self.emit("(");
                self.emit_joined(items, ", ");
                if items.len() == 1 {
                    self.emit(",");
                }
                self.emit(")");
            }
            NodeKind::Record(fields) => {
                self.emit("{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.emit(", ");
                    }
                    if is_ident(&field.key) {
                        self.emit(&field.key);
                    } else {
                        self.emit("'");
                        self.emit(&escape_raw(&field.key));
                        self.emit("'");
                    }
                    self.emit(": ");
                    self.node(&field.value);
                }
                self.emit("}");
            }
            NodeKind::Call { callee, args } => {
                self.node(callee);
                for (i, arg) in args.iter().enumerate() {
                    self.emit(" ");
                    if !needs_wrapping(arg) {
                        self.node(arg);
                    } else if i + 1 == args.len() && matches!(arg.kind, NodeKind::Call { .. }) {
                        self.emit("$ ");
                        self.node(arg);
                    } else {
                        self.emit("(");
                        self.node(arg);
                        self.emit(")");
                    }
                }
            }
            NodeKind::Postfix { target, op } => {
                self.node(target);
                self.emit(op.as_str());
            }
            NodeKind::Binary { op, lhs, rhs } => {
                self.node(lhs);
                self.emit(" ");
                self.emit(op.as_str());
                self.emit(" ");
                self.node(rhs);
            }
            NodeKind::Compare { op, lhs, rhs } => {
                self.node(lhs);
                self.emit(" ");
                self.emit(op.as_str());
                self.emit(" ");
                self.node(rhs);
            }
            NodeKind::Range { from, to } => {
                self.node(from);
                self.emit("..");
                self.node(to);
            }
            NodeKind::Take { name, source } => {
                self.emit(name);
                self.emit(" <- ");
                self.node(source);
            }
            NodeKind::Function { params, body } => {
                if params.is_empty() {
                    self.emit("()");
                } else {
                    self.emit(&params.join(" "));
                }
                self.emit(" => ");
                self.node(body);
            }
            NodeKind::Not(operand) => {
                self.emit("!");
                self.node(operand);
            }
            NodeKind::Operator(op) => {
                self.emit("(");
                self.emit(op);
                self.emit(")");
            }
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Call arguments are parsed at generator-binding level; anything looser
/// has to be parenthesised (or introduced with `$`) to read back the same.
fn needs_wrapping(arg: &Node) -> bool {
    matches!(
        arg.kind,
        NodeKind::Call { .. } | NodeKind::Assign { .. } | NodeKind::Function { .. } | NodeKind::Sequence(_)
    )
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !matches!(s, "true" | "false" | "else")
}

fn escape_raw(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
