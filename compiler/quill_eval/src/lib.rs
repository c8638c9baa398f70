//! Quill Eval - interpreter, register binder and variable contexts.
//!
//! # Architecture
//!
//! - `Registers`: per-call slot array binding positional arguments to a
//!   script's parameters and locals
//! - `Context`: caller-supplied variable environment (`MapContext`,
//!   `SharedContext`)
//! - `Interpreter`: single-use tree walker built by `InterpreterBuilder`
//! - `evaluate_binary`/`evaluate_unary`: direct enum-based operator dispatch
//! - `EvalConfig`: strictness, debug spans and evaluation limits
//!
//! Errors are typed (`EvalError`, `EvalErrorKind`) and propagate unchanged.

mod config;
mod context;
pub mod errors;
pub mod interpreter;
mod operators;
mod registers;
mod value;

pub use config::EvalConfig;
pub use context::{Context, MapContext, SharedContext};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, evaluate_unary};
pub use registers::Registers;
pub use value::Value;
