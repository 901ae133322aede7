//! Operator semantics.
//!
//! Direct enum dispatch over a fixed operator set. All operators are total:
//! the language coerces instead of failing, so these return a `Value`
//! rather than a `Result`.

use std::cmp::Ordering;

use tempo_ir::{BinaryOp, UnaryOp};
use tempo_value::Value;

/// Apply a binary operator to two evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> Value {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => Value::Number(left.to_number() - right.to_number()),
        BinaryOp::Mul => Value::Number(left.to_number() * right.to_number()),
        BinaryOp::Div => Value::Number(left.to_number() / right.to_number()),
        // `%` on f64 truncates toward zero and keeps the dividend's sign.
        BinaryOp::Mod => Value::Number(left.to_number() % right.to_number()),

        BinaryOp::Eq => Value::Bool(left.loosely_equals(right)),
        BinaryOp::NotEq => Value::Bool(!left.loosely_equals(right)),
        BinaryOp::StrictEq => Value::Bool(left == right),
        BinaryOp::StrictNotEq => Value::Bool(left != right),
        BinaryOp::Lt => Value::Bool(compare(left, right) == Some(Ordering::Less)),
        BinaryOp::LtEq => Value::Bool(matches!(
            compare(left, right),
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinaryOp::Gt => Value::Bool(compare(left, right) == Some(Ordering::Greater)),
        BinaryOp::GtEq => Value::Bool(matches!(
            compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        )),

        BinaryOp::BitAnd => int(left.to_int() & right.to_int()),
        BinaryOp::BitOr => int(left.to_int() | right.to_int()),
        BinaryOp::BitXor => int(left.to_int() ^ right.to_int()),
        BinaryOp::Shl => int(left.to_int().wrapping_shl(shift_amount(right))),
        BinaryOp::Shr => int(left.to_int().wrapping_shr(shift_amount(right))),
    }
}

/// Apply a prefix operator.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> Value {
    match op {
        UnaryOp::Neg => Value::Number(-operand.to_number()),
        UnaryOp::Not => Value::Bool(!operand.is_truthy()),
        UnaryOp::BitNot => int(!operand.to_int()),
    }
}

/// `+` concatenates as soon as either side is a string.
fn add(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Str(_), _) | (_, Value::Str(_)) => Value::string(format!("{left}{right}")),
        _ => Value::Number(left.to_number() + right.to_number()),
    }
}

/// Strings compare lexicographically, everything else numerically.
/// `None` when either side is NaN.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some((**a).cmp(&**b)),
        _ => left.to_number().partial_cmp(&right.to_number()),
    }
}

/// Shift counts use the low five bits.
fn shift_amount(count: &Value) -> u32 {
    (count.to_int() & 31).unsigned_abs()
}

#[inline]
fn int(n: i32) -> Value {
    Value::Number(f64::from(n))
}
