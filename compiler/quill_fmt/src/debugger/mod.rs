//! Tree-to-text reconstruction.
//!
//! The debugger walks a tree depth-first in child order and emits the tokens
//! a parser would have consumed to build it. The result is parse-equivalent
//! to the source text, not byte-identical: statements are joined with
//! `"; "`, operands are parenthesised only where precedence requires it and
//! string literals are re-quoted.
//!
//! While walking, it accumulates the smallest start and the largest end over
//! every visited node that carries a span. That range is what diagnostics
//! report as the location of the reconstructed text.

use quill_ir::{Literal, Node, NodeKind, Span, UnaryOp};
use quill_stack::ensure_sufficient_stack;

use crate::emitter::StringEmitter;

/// Binding strength of a node when it appears as an operand.
///
/// Lower binds tighter. Binary operators sit between `UNARY` and `TERNARY`
/// at `op.precedence() + 1`.
mod level {
    pub const ATOM: u8 = 0;
    pub const UNARY: u8 = 1;
    pub const TERNARY: u8 = 8;
    pub const ASSIGN: u8 = 9;
    pub const STATEMENT: u8 = 10;
}

fn binding_level(node: &Node) -> u8 {
    match node.kind() {
        NodeKind::Literal(_)
        | NodeKind::Identifier { .. }
        | NodeKind::Array
        | NodeKind::Index
        | NodeKind::Size => level::ATOM,
        NodeKind::Unary(_) => level::UNARY,
        NodeKind::Binary(op) => op.precedence() + 1,
        NodeKind::Ternary => level::TERNARY,
        NodeKind::Assign => level::ASSIGN,
        NodeKind::Script
        | NodeKind::Block
        | NodeKind::Var { .. }
        | NodeKind::If
        | NodeKind::While => level::STATEMENT,
    }
}

/// Whether the rendered node begins with a minus sign.
fn starts_with_minus(node: &Node) -> bool {
    match node.kind() {
        NodeKind::Unary(UnaryOp::Neg) => true,
        NodeKind::Literal(Literal::Int(v)) => *v < 0,
        NodeKind::Literal(Literal::Float(v)) => v.is_sign_negative(),
        _ => false,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Done,
}

/// Reconstructs source text from a tree and records the span it covers.
///
/// A debugger is single-use: the first [`debug`](Debugger::debug) call walks
/// the tree, later calls only report that first outcome.
#[derive(Debug)]
pub struct Debugger<'s> {
    source: Option<&'s str>,
    out: StringEmitter,
    span: Option<Span>,
    state: State,
}

impl Default for Debugger<'_> {
    fn default() -> Self {
        Debugger {
            source: None,
            out: StringEmitter::new(),
            span: None,
            state: State::Idle,
        }
    }
}

impl Debugger<'static> {
    /// A debugger that synthesises every token from the tree.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'s> Debugger<'s> {
    /// A debugger that copies literals and identifiers from `source` when
    /// their spans slice it cleanly.
    pub fn with_source(source: &'s str) -> Self {
        Debugger {
            source: Some(source),
            ..Debugger::default()
        }
    }

    /// Walk `node` and build the reconstructed text.
    ///
    /// Returns `true` when at least one visited node carried a span.
    pub fn debug(&mut self, node: &Node) -> bool {
        if self.state == State::Done {
            tracing::warn!(
                span = ?self.span,
                "debugger already ran, reporting its first result"
            );
            return self.span.is_some();
        }
        self.state = State::Done;
        self.write_node(node);
        tracing::trace!(len = self.out.as_str().len(), span = ?self.span, "tree reconstructed");
        self.span.is_some()
    }

    /// The reconstructed text, empty before `debug` runs.
    pub fn data(&self) -> &str {
        self.out.as_str()
    }

    /// Consume the debugger, returning the reconstructed text.
    pub fn into_data(self) -> String {
        self.out.output()
    }

    pub fn start(&self) -> Option<u32> {
        self.span.map(|span| span.start)
    }

    pub fn end(&self) -> Option<u32> {
        self.span.map(|span| span.end)
    }

    /// Smallest range covering every visited span.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    fn write_node(&mut self, node: &Node) {
        ensure_sufficient_stack(|| self.write_node_inner(node));
    }

    fn write_node_inner(&mut self, node: &Node) {
        if let Some(span) = node.span() {
            self.span = Some(Span::cover(self.span, span));
        }

        match (node.kind(), node.children()) {
            (NodeKind::Script, statements) => self.write_separated(statements, "; "),
            (NodeKind::Block, []) => self.out.emit("{}"),
            (NodeKind::Block, statements) => {
                self.out.emit("{ ");
                self.write_separated(statements, "; ");
                self.out.emit(" }");
            }
            (NodeKind::Literal(literal), []) => {
                if !self.write_source_slice(node) {
                    self.write_literal(literal);
                }
            }
            (NodeKind::Identifier { name, .. }, []) => {
                if !self.write_source_slice(node) {
                    self.out.emit(name);
                }
            }
            (NodeKind::Var { name, .. }, []) => {
                self.out.emit("var ");
                self.out.emit(name);
            }
            (NodeKind::Var { name, .. }, [init]) => {
                self.out.emit("var ");
                self.out.emit(name);
                self.out.emit_spaced("=");
                self.write_operand(init, binding_level(init) > level::ASSIGN);
            }
            (NodeKind::Assign, [target, value]) => {
                self.write_operand(target, binding_level(target) > level::ATOM);
                self.out.emit_spaced("=");
                self.write_operand(value, binding_level(value) > level::ASSIGN);
            }
            (NodeKind::Binary(op), [left, right]) => {
                let parent = op.precedence() + 1;
                self.write_operand(left, binding_level(left) > parent);
                self.out.emit_spaced(op.as_symbol());
                // Operators are left-associative, so an equal level on the
                // right needs parentheses.
                self.write_operand(right, binding_level(right) >= parent);
            }
            (NodeKind::Unary(op), [operand]) => {
                self.out.emit(op.as_symbol());
                let parens = binding_level(operand) > level::UNARY
                    || (*op == UnaryOp::Neg && starts_with_minus(operand));
                self.write_operand(operand, parens);
            }
            (NodeKind::Ternary, [condition, then, otherwise]) => {
                self.write_operand(condition, binding_level(condition) >= level::TERNARY);
                self.out.emit_spaced("?");
                self.write_operand(then, binding_level(then) > level::TERNARY);
                self.out.emit_spaced(":");
                self.write_operand(otherwise, binding_level(otherwise) > level::TERNARY);
            }
            (NodeKind::If, [condition, then, rest @ ..]) if rest.len() <= 1 => {
                self.out.emit("if (");
                self.write_node(condition);
                self.out.emit(") ");
                self.write_node(then);
                if let [otherwise] = rest {
                    self.out.emit(" else ");
                    self.write_node(otherwise);
                }
            }
            (NodeKind::While, [condition, body]) => {
                self.out.emit("while (");
                self.write_node(condition);
                self.out.emit(") ");
                self.write_node(body);
            }
            (NodeKind::Array, elements) => {
                self.out.emit_char('[');
                self.write_separated(elements, ", ");
                self.out.emit_char(']');
            }
            (NodeKind::Index, [target, index]) => {
                self.write_operand(target, binding_level(target) > level::ATOM);
                self.out.emit_char('[');
                self.write_node(index);
                self.out.emit_char(']');
            }
            (NodeKind::Size, [operand]) => {
                self.out.emit("size(");
                self.write_node(operand);
                self.out.emit_char(')');
            }
            (kind, children) => self.write_malformed(kind, children),
        }
    }

    /// A node whose children do not match its kind's layout still renders,
    /// as `kind(child, ...)`.
    fn write_malformed(&mut self, kind: &NodeKind, children: &[Node]) {
        tracing::debug!(
            kind = kind.name(),
            children = children.len(),
            "rendering malformed node"
        );
        self.out.emit(kind.name());
        self.out.emit_char('(');
        self.write_separated(children, ", ");
        self.out.emit_char(')');
    }

    fn write_separated(&mut self, nodes: &[Node], separator: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.emit(separator);
            }
            self.write_node(node);
        }
    }

    fn write_operand(&mut self, node: &Node, parens: bool) {
        if parens {
            self.out.emit_char('(');
            self.write_node(node);
            self.out.emit_char(')');
        } else {
            self.write_node(node);
        }
    }

    /// Copy a leaf's text from the source. Returns `false` when there is no
    /// source, no span, or the span does not slice the source.
    fn write_source_slice(&mut self, node: &Node) -> bool {
        let slice = self
            .source
            .zip(node.span())
            .and_then(|(source, span)| span.slice(source))
            .filter(|text| !text.trim().is_empty());
        match slice {
            Some(text) => {
                self.out.emit(text.trim());
                true
            }
            None => false,
        }
    }

    fn write_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Null => self.out.emit("null"),
            Literal::Bool(true) => self.out.emit("true"),
            Literal::Bool(false) => self.out.emit("false"),
            Literal::Int(v) => self.out.emit(&v.to_string()),
            // Debug keeps the fractional part, so `1.0` stays a float.
            Literal::Float(v) => self.out.emit(&format!("{v:?}")),
            Literal::Str(s) => self.out.emit_quoted(s),
        }
    }
}
