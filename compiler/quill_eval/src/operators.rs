//! Binary and unary operator evaluation.
//!
//! Direct enum dispatch over `BinaryOp`/`UnaryOp`. `&&` and `||` are handled
//! by the interpreter because they short-circuit; here they only combine two
//! already-evaluated operands.

use std::cmp::Ordering;

use quill_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    division_by_zero, integer_overflow, invalid_binary_op, invalid_unary_op, modulo_by_zero,
    EvalResult,
};
use crate::Value;

/// Evaluate a binary operation on two values.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            arithmetic(&left, &right, op)
        }
        BinaryOp::Eq => Ok(Value::Bool(values_equal(&left, &right))),
        BinaryOp::NotEq => Ok(Value::Bool(!values_equal(&left, &right))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering =
                compare(&left, &right).ok_or_else(|| invalid_binary_op(op, &left, &right))?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

/// Evaluate a unary operation.
pub fn evaluate_unary(operand: Value, op: UnaryOp) -> EvalResult {
    match (op, &operand) {
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Not, _) => Ok(Value::Bool(!operand.is_truthy())),
        (UnaryOp::Neg, _) => Err(invalid_unary_op(op, &operand)),
    }
}

fn add(left: Value, right: Value) -> EvalResult {
    match (&left, &right) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{a}{b}"))),
        (Value::Str(a), other) if !other.is_void() => Ok(Value::string(format!("{a}{other}"))),
        (other, Value::Str(b)) if !other.is_void() => Ok(Value::string(format!("{other}{b}"))),
        _ => arithmetic(&left, &right, BinaryOp::Add),
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "int/float mixing promotes to float by definition"
)]
fn arithmetic(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_arithmetic(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_arithmetic(*a, *b, op))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(float_arithmetic(*a as f64, *b, op))),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(float_arithmetic(*a, *b as f64, op))),
        _ => Err(invalid_binary_op(op, left, right)),
    }
}

fn int_arithmetic(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let result = match op {
        BinaryOp::Add => a.checked_add(b).ok_or_else(|| integer_overflow("addition")),
        BinaryOp::Sub => a.checked_sub(b).ok_or_else(|| integer_overflow("subtraction")),
        BinaryOp::Mul => a
            .checked_mul(b)
            .ok_or_else(|| integer_overflow("multiplication")),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            a.checked_div(b).ok_or_else(|| integer_overflow("division"))
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(modulo_by_zero());
            }
            a.checked_rem(b).ok_or_else(|| integer_overflow("remainder"))
        }
        _ => return Err(invalid_binary_op(op, &Value::Int(a), &Value::Int(b))),
    };
    result.map(Value::Int)
}

fn float_arithmetic(a: f64, b: f64, op: BinaryOp) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        _ => a % b,
    }
}

/// Equality: numbers compare across int/float, arrays element by element
/// under the same rule, everything else structurally.
#[allow(clippy::cast_precision_loss, reason = "int/float equality compares as float")]
#[allow(clippy::float_cmp, reason = "language-level equality is exact")]
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        _ => left == right,
    }
}

#[allow(clippy::cast_precision_loss, reason = "int/float ordering compares as float")]
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
