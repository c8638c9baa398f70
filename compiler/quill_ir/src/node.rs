//! Syntax tree nodes.
//!
//! A tree is produced once by a parser and then shared read-only by every
//! evaluation of the owning script. `Node` owns its children directly; there
//! is no arena, since trees are small and never mutated after construction.

use crate::{BinaryOp, Span, UnaryOp};

/// Literal constants.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// The closed set of node kinds.
///
/// Child layout per kind:
///
/// | Kind | Children |
/// |------|----------|
/// | `Script`, `Block` | statements |
/// | `Literal`, `Identifier` | none |
/// | `Var` | optional initialiser |
/// | `Assign` | target, value |
/// | `Binary` | left, right |
/// | `Unary`, `Size` | operand |
/// | `Ternary` | condition, then, else |
/// | `If` | condition, then, optional else |
/// | `While` | condition, body |
/// | `Array` | elements |
/// | `Index` | target, index |
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Script,
    Block,
    Literal(Literal),
    /// A variable reference. `register` is the slot of a script parameter
    /// or local; `None` means the name is free and resolved by the context.
    Identifier {
        name: String,
        register: Option<u32>,
    },
    /// A local declaration bound to a register slot.
    Var {
        name: String,
        register: u32,
    },
    Assign,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Ternary,
    If,
    While,
    Array,
    Index,
    Size,
}

impl NodeKind {
    /// Short, stable name of the kind for logs and error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeKind::Script => "script",
            NodeKind::Block => "block",
            NodeKind::Literal(_) => "literal",
            NodeKind::Identifier { .. } => "identifier",
            NodeKind::Var { .. } => "var",
            NodeKind::Assign => "assign",
            NodeKind::Binary(_) => "binary",
            NodeKind::Unary(_) => "unary",
            NodeKind::Ternary => "ternary",
            NodeKind::If => "if",
            NodeKind::While => "while",
            NodeKind::Array => "array",
            NodeKind::Index => "index",
            NodeKind::Size => "size",
        }
    }
}

/// A syntax tree node: a kind, ordered children and an optional source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Node>,
    span: Option<Span>,
}

/// Children are released from a heap worklist rather than by recursion, so
/// dropping a tree of any depth uses constant stack.
impl Drop for Node {
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl Node {
    /// Create a node without span information.
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Node {
            kind,
            children,
            span: None,
        }
    }

    /// Attach a source span to this node.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Shorthand for `with_span(Span::new(start, end))`.
    #[must_use]
    pub fn at(self, start: u32, end: u32) -> Self {
        self.with_span(Span::new(start, end))
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    #[inline]
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Visit this node and all descendants depth-first, in child order.
    ///
    /// Uses a heap worklist, so tree depth is not bounded by the stack.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            f(node);
            pending.extend(node.children.iter().rev());
        }
    }

    // Constructors

    pub fn script(statements: Vec<Node>) -> Self {
        Node::new(NodeKind::Script, statements)
    }

    pub fn block(statements: Vec<Node>) -> Self {
        Node::new(NodeKind::Block, statements)
    }

    pub fn literal(literal: Literal) -> Self {
        Node::new(NodeKind::Literal(literal), Vec::new())
    }

    pub fn null() -> Self {
        Node::literal(Literal::Null)
    }

    pub fn bool(value: bool) -> Self {
        Node::literal(Literal::Bool(value))
    }

    pub fn int(value: i64) -> Self {
        Node::literal(Literal::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Node::literal(Literal::Float(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::literal(Literal::Str(value.into()))
    }

    /// A free variable, resolved through the context.
    pub fn ident(name: impl Into<String>) -> Self {
        Node::new(
            NodeKind::Identifier {
                name: name.into(),
                register: None,
            },
            Vec::new(),
        )
    }

    /// A parameter or local bound to register `register`.
    pub fn register(name: impl Into<String>, register: u32) -> Self {
        Node::new(
            NodeKind::Identifier {
                name: name.into(),
                register: Some(register),
            },
            Vec::new(),
        )
    }

    pub fn var(name: impl Into<String>, register: u32, init: Option<Node>) -> Self {
        Node::new(
            NodeKind::Var {
                name: name.into(),
                register,
            },
            init.into_iter().collect(),
        )
    }

    pub fn assign(target: Node, value: Node) -> Self {
        Node::new(NodeKind::Assign, vec![target, value])
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::new(NodeKind::Binary(op), vec![left, right])
    }

    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::new(NodeKind::Unary(op), vec![operand])
    }

    pub fn ternary(condition: Node, then: Node, otherwise: Node) -> Self {
        Node::new(NodeKind::Ternary, vec![condition, then, otherwise])
    }

    pub fn if_(condition: Node, then: Node, otherwise: Option<Node>) -> Self {
        let mut children = vec![condition, then];
        children.extend(otherwise);
        Node::new(NodeKind::If, children)
    }

    pub fn while_(condition: Node, body: Node) -> Self {
        Node::new(NodeKind::While, vec![condition, body])
    }

    pub fn array(elements: Vec<Node>) -> Self {
        Node::new(NodeKind::Array, elements)
    }

    pub fn index(target: Node, index: Node) -> Self {
        Node::new(NodeKind::Index, vec![target, index])
    }

    pub fn size(operand: Node) -> Self {
        Node::new(NodeKind::Size, vec![operand])
    }
}
