//! The engine: configuration plus the factories every call goes through.

use quill_eval::{Context, EvalConfig, Interpreter, InterpreterBuilder, Registers};
use quill_ir::ParsedScript;

use crate::{CompiledScript, ParseError, ScriptParser};

/// Script factory and evaluation settings.
///
/// An engine is an ordinary value: hosts create as many as they need and
/// pass one by reference to every `evaluate`/`execute` call. It holds no
/// per-call state, so one engine serves any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EvalConfig,
}

impl Engine {
    pub fn new(config: EvalConfig) -> Self {
        Engine { config }
    }

    #[inline]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Wrap an already parsed tree.
    pub fn create_script(&self, script: ParsedScript) -> CompiledScript {
        tracing::debug!(
            statements = script.root().num_children(),
            parameters = script.parameters().len(),
            locals = script.local_variables().len(),
            "script created"
        );
        CompiledScript::new(script)
    }

    /// Parse `source` with `parser` and wrap the result.
    ///
    /// If the parser did not record the source text, `source` is attached so
    /// the script can report and reconstruct it.
    pub fn parse(
        &self,
        parser: &impl ScriptParser,
        source: &str,
    ) -> Result<CompiledScript, ParseError> {
        let script = parser.parse(source).inspect_err(|e| {
            tracing::debug!(error = %e, "parse failed");
        })?;
        let script = if script.source().is_some() {
            script
        } else {
            script.with_source(source)
        };
        Ok(self.create_script(script))
    }

    /// Build a fresh interpreter over `context` with the given slots.
    pub fn create_interpreter<'a>(
        &'a self,
        context: &'a mut dyn Context,
        registers: Registers<'a>,
    ) -> Interpreter<'a> {
        InterpreterBuilder::new(&self.config, context)
            .registers(registers)
            .build()
    }
}
