//! Binary and unary operators.
//!
//! The value set is closed, so operators dispatch by matching on the operand
//! pair. Logical operators and assignment are not here: they need unevaluated
//! operands and are handled by the interpreter.

use std::rc::Rc;

use zylo_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    division_by_zero, integer_overflow, invalid_unary, modulo_by_zero, type_mismatch, EvalResult,
};
use crate::value::Value;

/// Apply a non-logical binary operator to two evaluated operands.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(values_equal(left, right))),
        BinaryOp::NotEq => Ok(Value::Bool(!values_equal(left, right))),
        BinaryOp::Add if is_string(left) || is_string(right) => {
            Ok(Value::string(format!("{left}{right}")))
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            arithmetic(op, left, right)
        }
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            ordering(op, left, right)
        }
        BinaryOp::And | BinaryOp::Or | BinaryOp::Assign => {
            Err(type_mismatch(op.as_symbol(), left, right))
        }
    }
}

fn is_string(value: &Value) -> bool {
    matches!(value, Value::Str(_))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integer operands promote to float in mixed arithmetic"
)]
fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(x) => Some(*x),
        _ => None,
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return int_arithmetic(op, *a, *b);
    }
    match (as_float(left), as_float(right)) {
        (Some(a), Some(b)) => float_arithmetic(op, a, b),
        _ => Err(type_mismatch(op.as_symbol(), left, right)),
    }
}

/// `op` is one of `+ - * / %`; anything past `/` is taken as `%`.
fn int_arithmetic(op: BinaryOp, a: i64, b: i64) -> EvalResult {
    let result = match op {
        BinaryOp::Add => a.checked_add(b).ok_or_else(|| integer_overflow("addition")),
        BinaryOp::Sub => a.checked_sub(b).ok_or_else(|| integer_overflow("subtraction")),
        BinaryOp::Mul => a.checked_mul(b).ok_or_else(|| integer_overflow("multiplication")),
        BinaryOp::Div if b == 0 => Err(division_by_zero()),
        BinaryOp::Div => a.checked_div(b).ok_or_else(|| integer_overflow("division")),
        _ if b == 0 => Err(modulo_by_zero()),
        _ => a.checked_rem(b).ok_or_else(|| integer_overflow("modulo")),
    };
    result.map(Value::Int)
}

fn float_arithmetic(op: BinaryOp, a: f64, b: f64) -> EvalResult {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div if b == 0.0 => return Err(division_by_zero()),
        BinaryOp::Div => a / b,
        _ if b == 0.0 => return Err(modulo_by_zero()),
        _ => a % b,
    };
    Ok(Value::Float(result))
}

fn ordering(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let ord = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        _ => match (as_float(left), as_float(right)) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(type_mismatch(op.as_symbol(), left, right)),
        },
    };
    // NaN compares false under every ordering operator.
    let Some(ord) = ord else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinaryOp::Lt => ord.is_lt(),
        BinaryOp::LtEq => ord.is_le(),
        BinaryOp::Gt => ord.is_gt(),
        _ => ord.is_ge(),
    };
    Ok(Value::Bool(result))
}

/// `==` semantics.
///
/// Scalars compare by value, numbers across Integer/Float. Containers,
/// instances and callables compare by identity. Mismatched kinds are unequal.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            as_float(left) == as_float(right)
        }
        (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
        (Value::Hash(a), Value::Hash(b)) => Rc::ptr_eq(a, b),
        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
        (Value::Builtin(a), Value::Builtin(b)) => a == b,
        (Value::ListMethod(a, xs), Value::ListMethod(b, ys)) => a == b && Rc::ptr_eq(xs, ys),
        (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
        (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
        (Value::BoundMethod(a), Value::BoundMethod(b)) => Rc::ptr_eq(a, b),
        (Value::Module(a), Value::Module(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

/// Apply a prefix operator.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Plus, Value::Int(_) | Value::Float(_)) => Ok(operand.clone()),
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (op, value) => Err(invalid_unary(op.as_symbol(), value)),
    }
}
