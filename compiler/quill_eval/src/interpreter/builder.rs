//! `InterpreterBuilder` for creating single-use `Interpreter` instances.

use super::Interpreter;
use crate::{Context, EvalConfig, Registers};

/// Builder for creating Interpreter instances.
///
/// Every interpreter needs the engine's configuration and the caller's
/// context. Registers default to an empty slot array, which sends every
/// variable lookup straight to the context.
pub struct InterpreterBuilder<'a> {
    config: &'a EvalConfig,
    context: &'a mut dyn Context,
    registers: Option<Registers<'a>>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(config: &'a EvalConfig, context: &'a mut dyn Context) -> Self {
        Self {
            config,
            context,
            registers: None,
        }
    }

    /// Set the register slots bound for this call.
    #[must_use]
    pub fn registers(mut self, registers: Registers<'a>) -> Self {
        self.registers = Some(registers);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            config: self.config,
            context: self.context,
            registers: self.registers.unwrap_or_default(),
            depth: 0,
        }
    }
}
