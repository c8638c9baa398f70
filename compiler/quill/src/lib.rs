//! Quill - an embeddable expression and script evaluator.
//!
//! A host hands source text to a [`ScriptParser`], wraps the resulting tree
//! with [`Engine::create_script`] and evaluates it any number of times, from
//! any number of threads, each call against its own [`Context`]:
//!
//! ```text
//! let engine = Engine::default();
//! let script = engine.parse(&parser, "x + 1")?;
//! let mut context = MapContext::new().with("x", 41_i64);
//! assert_eq!(script.evaluate(&engine, &mut context)?, Value::int(42));
//! ```
//!
//! - [`Expression`]: evaluate the first statement, render diagnostics
//! - [`Script`]: execute every statement with positional arguments
//! - [`CompiledScript`]: the immutable, shareable implementation of both

mod engine;
mod parser;
mod script;

use std::sync::Once;

pub use engine::Engine;
pub use parser::{ParseError, ScriptParser};
pub use script::{CompiledScript, Expression, Script};

pub use quill_eval::{
    Context, EvalConfig, EvalError, EvalErrorKind, EvalResult, Interpreter, MapContext,
    Registers, SharedContext, Value,
};
pub use quill_ir::{BinaryOp, Literal, Node, NodeKind, ParsedScript, ScriptError, Span, UnaryOp};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debugging.
///
/// Call this at the start of the host program to enable tracing output.
/// Configure with the `RUST_LOG` environment variable:
/// - `RUST_LOG=quill=debug` - script creation and call summaries
/// - `RUST_LOG=quill_eval=trace` - per-node evaluation
/// - `RUST_LOG=quill_fmt=trace` - debugger output
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
