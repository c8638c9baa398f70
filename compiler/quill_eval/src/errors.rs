//! Evaluation errors.
//!
//! `EvalErrorKind` is the structured category; `EvalError` pairs it with the
//! span of the node that failed when the engine runs with debug info on.
//! Errors are propagated unchanged to the caller of `evaluate`/`execute`.

use std::fmt;

use quill_ir::{BinaryOp, Span, UnaryOp};

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    #[error("invalid operands for `{op}`: {left} and {right}")]
    InvalidBinaryOp {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },

    #[error("invalid operand for unary `{op}`: {operand}")]
    InvalidUnaryOp { op: UnaryOp, operand: &'static str },

    #[error("cannot index into {type_name} with {index_type}")]
    NotIndexable {
        type_name: &'static str,
        index_type: &'static str,
    },

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("register {index} does not exist")]
    UnknownRegister { index: u32 },

    #[error("cannot assign to {target}")]
    InvalidAssignmentTarget { target: &'static str },

    #[error("size() is not defined for {type_name}")]
    NotSizeable { type_name: &'static str },

    #[error("maximum nesting depth of {depth} exceeded")]
    RecursionLimitExceeded { depth: usize },

    #[error("loop exceeded {limit} iterations")]
    LoopLimitExceeded { limit: u64 },

    #[error("malformed {kind} node: expected {expected} children, found {found}")]
    MalformedNode {
        kind: &'static str,
        expected: &'static str,
        found: usize,
    },
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Source location of the failing node, when known.
    pub span: Option<Span>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach a span unless one is already recorded.
    ///
    /// Errors bubble through every enclosing node; the innermost span wins.
    #[must_use]
    pub fn at(mut self, span: Option<Span>) -> Self {
        if self.span.is_none() {
            self.span = span;
        }
        self
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} at {span}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// Constructors

pub fn undefined_variable(name: &str) -> EvalError {
    EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    }
    .into()
}

pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

pub fn modulo_by_zero() -> EvalError {
    EvalErrorKind::ModuloByZero.into()
}

pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalErrorKind::IntegerOverflow { operation }.into()
}

pub fn invalid_binary_op(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalErrorKind::InvalidBinaryOp {
        op,
        left: left.type_name(),
        right: right.type_name(),
    }
    .into()
}

pub fn invalid_unary_op(op: UnaryOp, operand: &Value) -> EvalError {
    EvalErrorKind::InvalidUnaryOp {
        op,
        operand: operand.type_name(),
    }
    .into()
}

pub fn not_indexable(target: &Value, index: &Value) -> EvalError {
    EvalErrorKind::NotIndexable {
        type_name: target.type_name(),
        index_type: index.type_name(),
    }
    .into()
}

pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalErrorKind::IndexOutOfBounds { index, len }.into()
}

pub fn unknown_register(index: u32) -> EvalError {
    EvalErrorKind::UnknownRegister { index }.into()
}

pub fn invalid_assignment_target(target: &'static str) -> EvalError {
    EvalErrorKind::InvalidAssignmentTarget { target }.into()
}

pub fn not_sizeable(value: &Value) -> EvalError {
    EvalErrorKind::NotSizeable {
        type_name: value.type_name(),
    }
    .into()
}

pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalErrorKind::RecursionLimitExceeded { depth }.into()
}

pub fn loop_limit_exceeded(limit: u64) -> EvalError {
    EvalErrorKind::LoopLimitExceeded { limit }.into()
}

pub fn malformed_node(kind: &'static str, expected: &'static str, found: usize) -> EvalError {
    EvalErrorKind::MalformedNode {
        kind,
        expected,
        found,
    }
    .into()
}
