//! Compiled scripts and the two views hosts use them through.

use std::fmt;
use std::sync::Arc;

use quill_eval::{Context, EvalResult, Registers, Value};
use quill_fmt::Debugger;
use quill_ir::ParsedScript;

use crate::Engine;

/// A single expression: the first statement of a script.
pub trait Expression {
    /// Evaluate the first top-level statement against `context`.
    ///
    /// An empty script evaluates to [`Value::Void`].
    fn evaluate(&self, engine: &Engine, context: &mut dyn Context) -> EvalResult;

    /// Source text reconstructed from the tree, followed by the source range
    /// it covers as ` /*start:end*/`, or by `/*?:?*/ ` when no node carries
    /// a span.
    fn dump(&self) -> String;

    /// The source text, trimmed. Empty when none was recorded.
    fn expression(&self) -> &str;
}

/// A whole script: every statement, with optional positional arguments.
pub trait Script {
    /// Execute every statement, returning the value of the last one.
    fn execute(&self, engine: &Engine, context: &mut dyn Context) -> EvalResult {
        self.execute_with(engine, context, &[])
    }

    /// Execute with `args` bound to the parameters in order.
    ///
    /// Parameters without an argument are looked up in `context` by name;
    /// arguments beyond the last parameter are ignored.
    fn execute_with(&self, engine: &Engine, context: &mut dyn Context, args: &[Value])
        -> EvalResult;

    fn text(&self) -> &str;

    fn parameters(&self) -> &[String];

    fn local_variables(&self) -> &[String];
}

/// An immutable, thread-safe parsed script.
///
/// Cloning is cheap and shares the tree. Every call builds its own register
/// slots and interpreter, so concurrent calls never see each other's
/// arguments.
#[derive(Clone, Debug)]
pub struct CompiledScript {
    script: Arc<ParsedScript>,
}

impl CompiledScript {
    pub(crate) fn new(script: ParsedScript) -> Self {
        CompiledScript {
            script: Arc::new(script),
        }
    }

    /// The underlying tree and register layout.
    pub fn parsed(&self) -> &ParsedScript {
        &self.script
    }
}

impl Expression for CompiledScript {
    #[tracing::instrument(level = "debug", skip_all)]
    fn evaluate(&self, engine: &Engine, context: &mut dyn Context) -> EvalResult {
        let Some(first) = self.script.root().child(0) else {
            tracing::debug!("empty script");
            return Ok(Value::Void);
        };
        let registers = Registers::bind(self.script.registers(), &[]);
        engine.create_interpreter(context, registers).interpret(first)
    }

    fn dump(&self) -> String {
        let mut debugger = match self.script.source() {
            Some(source) => Debugger::with_source(source),
            None => Debugger::new(),
        };
        debugger.debug(self.script.root());
        match debugger.span() {
            Some(span) => format!("{} /*{}:{}*/", debugger.data(), span.start, span.end),
            None => format!("{}/*?:?*/ ", debugger.data()),
        }
    }

    fn expression(&self) -> &str {
        self.script.source().map_or("", str::trim)
    }
}

impl Script for CompiledScript {
    #[tracing::instrument(level = "debug", skip_all, fields(args = args.len()))]
    fn execute_with(
        &self,
        engine: &Engine,
        context: &mut dyn Context,
        args: &[Value],
    ) -> EvalResult {
        let registers = Registers::bind(self.script.registers(), args);
        engine
            .create_interpreter(context, registers)
            .interpret(self.script.root())
    }

    fn text(&self) -> &str {
        self.expression()
    }

    fn parameters(&self) -> &[String] {
        self.script.parameters()
    }

    fn local_variables(&self) -> &[String] {
        self.script.local_variables()
    }
}

impl fmt::Display for CompiledScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expression())
    }
}

impl From<ParsedScript> for CompiledScript {
    fn from(script: ParsedScript) -> Self {
        CompiledScript::new(script)
    }
}
