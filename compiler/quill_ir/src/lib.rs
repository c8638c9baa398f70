//! Quill IR - syntax tree and script data model.
//!
//! This crate contains the data shared by the evaluator and the debugger:
//! - `Span` for source locations
//! - `Node`/`NodeKind`, a closed set of node kinds with owned children
//! - `BinaryOp`/`UnaryOp`
//! - `ParsedScript`, the root node plus its register layout
//!
//! Everything here is immutable once built and is `Send + Sync`, so a parsed
//! script can be evaluated from many threads at once.

mod node;
mod operators;
mod script;
mod span;

pub use node::{Literal, Node, NodeKind};
pub use operators::{BinaryOp, UnaryOp};
pub use script::{ParsedScript, ScriptError};
pub use span::{Span, SpanError};
