//! Tree-walking interpreter.
//!
//! An `Interpreter` is built for exactly one evaluation call: it borrows the
//! engine's `EvalConfig` and the caller's context, and owns the register
//! slots bound for that call. Nothing survives the call, so independent
//! calls on the same tree never observe each other's state.
//!
//! # Variable resolution
//!
//! - `Identifier { register: Some(i) }`: the value bound to slot `i`; when
//!   the slot is unresolved, the context value for register `i`'s name.
//! - `Identifier { register: None }`: the context value for the name.
//! - Otherwise an `UndefinedVariable` error (strict) or `null` (lenient).
//!
//! Declarations and assignments to register identifiers write the slot;
//! assignments to free identifiers write the context.

mod builder;

pub use builder::InterpreterBuilder;

use std::sync::Arc;

use quill_ir::{BinaryOp, Node, NodeKind};
use quill_stack::ensure_sufficient_stack;

use crate::errors::{
    index_out_of_bounds, invalid_assignment_target, loop_limit_exceeded, malformed_node,
    not_indexable, not_sizeable, recursion_limit_exceeded, undefined_variable, unknown_register,
    EvalError, EvalResult,
};
use crate::{evaluate_binary, evaluate_unary};
use crate::{Context, EvalConfig, Registers, Value};

/// Single-use tree-walking interpreter.
pub struct Interpreter<'a> {
    config: &'a EvalConfig,
    context: &'a mut dyn Context,
    registers: Registers<'a>,
    depth: usize,
}

impl<'a> Interpreter<'a> {
    /// Evaluate `node` and everything below it.
    ///
    /// Errors from any node propagate unchanged, tagged with the span of the
    /// innermost node that carries one when debug info is enabled.
    pub fn interpret(&mut self, node: &Node) -> EvalResult {
        tracing::trace!(kind = node.kind().name(), registers = self.registers.len(), "interpret");
        self.eval(node)
    }

    /// Register slots as they stand after evaluation.
    pub fn registers(&self) -> &Registers<'a> {
        &self.registers
    }

    #[tracing::instrument(level = "trace", skip_all, fields(kind = node.kind().name()))]
    fn eval(&mut self, node: &Node) -> EvalResult {
        if let Some(limit) = self.config.depth_limit().filter(|&limit| self.depth >= limit) {
            return Err(self.locate(recursion_limit_exceeded(limit), node));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.eval_kind(node));
        self.depth -= 1;
        result.map_err(|e| self.locate(e, node))
    }

    fn locate(&self, err: EvalError, node: &Node) -> EvalError {
        if self.config.is_debug() {
            err.at(node.span())
        } else {
            err
        }
    }

    fn eval_kind(&mut self, node: &Node) -> EvalResult {
        match node.kind() {
            NodeKind::Script | NodeKind::Block => self.eval_sequence(node.children()),
            NodeKind::Literal(literal) => Ok(Value::from(literal)),
            NodeKind::Identifier { name, register } => self.resolve(name, *register),
            NodeKind::Var { register, .. } => match node.children() {
                [] => Ok(Value::Void),
                [init] => {
                    let value = self.eval(init)?;
                    self.store_register(*register, value.clone())?;
                    Ok(value)
                }
                other => Err(malformed_node("var", "0 or 1", other.len())),
            },
            NodeKind::Assign => {
                let [target, value] = node.children() else {
                    return Err(malformed_node("assign", "2", node.num_children()));
                };
                let value = self.eval(value)?;
                self.assign(target, value.clone())?;
                Ok(value)
            }
            NodeKind::Binary(op) => {
                let [left, right] = node.children() else {
                    return Err(malformed_node("binary", "2", node.num_children()));
                };
                self.eval_binary(*op, left, right)
            }
            NodeKind::Unary(op) => {
                let [operand] = node.children() else {
                    return Err(malformed_node("unary", "1", node.num_children()));
                };
                let value = self.eval(operand)?;
                evaluate_unary(value, *op)
            }
            NodeKind::Ternary => {
                let [condition, then, otherwise] = node.children() else {
                    return Err(malformed_node("ternary", "3", node.num_children()));
                };
                if self.eval(condition)?.is_truthy() {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            NodeKind::If => match node.children() {
                [condition, then, rest @ ..] if rest.len() <= 1 => {
                    if self.eval(condition)?.is_truthy() {
                        self.eval(then)
                    } else if let [otherwise] = rest {
                        self.eval(otherwise)
                    } else {
                        Ok(Value::Void)
                    }
                }
                other => Err(malformed_node("if", "2 or 3", other.len())),
            },
            NodeKind::While => {
                let [condition, body] = node.children() else {
                    return Err(malformed_node("while", "2", node.num_children()));
                };
                self.eval_while(condition, body)
            }
            NodeKind::Array => {
                let items = node
                    .children()
                    .iter()
                    .map(|child| self.eval(child))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(items))
            }
            NodeKind::Index => {
                let [target, index] = node.children() else {
                    return Err(malformed_node("index", "2", node.num_children()));
                };
                let target = self.eval(target)?;
                let index = self.eval(index)?;
                index_value(&target, &index)
            }
            NodeKind::Size => {
                let [operand] = node.children() else {
                    return Err(malformed_node("size", "1", node.num_children()));
                };
                let value = self.eval(operand)?;
                size_of(&value)
            }
        }
    }

    fn eval_sequence(&mut self, statements: &[Node]) -> EvalResult {
        let mut last = Value::Void;
        for statement in statements {
            last = self.eval(statement)?;
        }
        Ok(last)
    }

    fn eval_binary(&mut self, op: BinaryOp, left: &Node, right: &Node) -> EvalResult {
        let left = self.eval(left)?;
        match op {
            BinaryOp::And if !left.is_truthy() => Ok(Value::Bool(false)),
            BinaryOp::Or if left.is_truthy() => Ok(Value::Bool(true)),
            _ => {
                let right = self.eval(right)?;
                evaluate_binary(left, right, op)
            }
        }
    }

    fn eval_while(&mut self, condition: &Node, body: &Node) -> EvalResult {
        let limit = self.config.loop_limit();
        let mut iterations: u64 = 0;
        let mut last = Value::Void;
        while self.eval(condition)?.is_truthy() {
            if limit.is_some_and(|limit| iterations >= limit) {
                return Err(loop_limit_exceeded(iterations));
            }
            iterations += 1;
            last = self.eval(body)?;
        }
        Ok(last)
    }

    fn resolve(&self, name: &str, register: Option<u32>) -> EvalResult {
        let lookup_name = match register {
            Some(index) => {
                if let Some(value) = self.registers.get(index) {
                    return Ok(value.clone());
                }
                self.registers.name(index).unwrap_or(name)
            }
            None => name,
        };
        if let Some(value) = self.context.get(lookup_name) {
            if register.is_some() {
                tracing::debug!(name = lookup_name, "unresolved register read from context");
            }
            return Ok(value);
        }
        if self.config.is_strict() {
            Err(undefined_variable(lookup_name))
        } else {
            tracing::warn!(name = lookup_name, "undefined variable evaluates to null");
            Ok(Value::Null)
        }
    }

    fn store_register(&mut self, index: u32, value: Value) -> Result<(), EvalError> {
        if self.registers.set(index, value) {
            Ok(())
        } else {
            Err(unknown_register(index))
        }
    }

    fn assign(&mut self, target: &Node, value: Value) -> Result<(), EvalError> {
        match target.kind() {
            NodeKind::Identifier {
                register: Some(index),
                ..
            } => self.store_register(*index, value),
            NodeKind::Identifier {
                name,
                register: None,
            } => {
                self.context.set(name, value);
                Ok(())
            }
            NodeKind::Index => {
                let [container, index] = target.children() else {
                    return Err(malformed_node("index", "2", target.num_children()));
                };
                let NodeKind::Identifier { name, register } = container.kind() else {
                    return Err(invalid_assignment_target(container.kind().name()));
                };
                let index = self.eval(index)?;
                let current = self.resolve(name, *register)?;
                let updated = replace_element(current, &index, value)?;
                self.assign(container, updated)
            }
            other => Err(invalid_assignment_target(other.name())),
        }
    }
}

fn element_position(index: i64, len: usize) -> Result<usize, EvalError> {
    usize::try_from(index)
        .ok()
        .filter(|&pos| pos < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

fn index_value(target: &Value, index: &Value) -> EvalResult {
    match (target, index) {
        (Value::Array(items), Value::Int(i)) => {
            let pos = element_position(*i, items.len())?;
            Ok(items[pos].clone())
        }
        (Value::Str(s), Value::Int(i)) => {
            let pos = element_position(*i, s.chars().count())?;
            Ok(s.chars()
                .nth(pos)
                .map_or(Value::Null, |c| Value::string(c.to_string())))
        }
        _ => Err(not_indexable(target, index)),
    }
}

fn replace_element(current: Value, index: &Value, value: Value) -> EvalResult {
    match (current, index) {
        (Value::Array(mut items), Value::Int(i)) => {
            let pos = element_position(*i, items.len())?;
            Arc::make_mut(&mut items)[pos] = value;
            Ok(Value::Array(items))
        }
        (other, _) => Err(not_indexable(&other, index)),
    }
}

fn size_of(value: &Value) -> EvalResult {
    let len = match value {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        _ => return Err(not_sizeable(value)),
    };
    Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
}
