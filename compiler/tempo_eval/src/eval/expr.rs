use tempo_ir::{LogicalOp, Name};
use tempo_value::{property_of_undefined, EvalResult, PropertyBag, Value};

use crate::ast::{Expr, ExprKind};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::scope::Scope;
use crate::stack::ensure_sufficient_stack;

use super::locate;

impl Expr {
    /// Evaluate against `scope`.
    pub fn evaluate(&self, scope: &Scope<'_>) -> EvalResult {
        ensure_sufficient_stack(|| self.evaluate_inner(scope))
            .map_err(|error| locate(error, self.location))
    }

    fn evaluate_inner(&self, scope: &Scope<'_>) -> EvalResult {
        match &self.kind {
            ExprKind::Literal(value) | ExprKind::ApiConstant(value) => Ok(value.clone()),
            ExprKind::Var(target) => target.get(scope),
            ExprKind::Assign { target, op, value } => {
                let new_value = match op {
                    Some(op) => {
                        let current = target.get(scope)?;
                        evaluate_binary(&current, &value.evaluate(scope)?, *op)
                    }
                    None => value.evaluate(scope)?,
                };
                target.set(scope, new_value.clone())?;
                Ok(new_value)
            }
            ExprKind::Binary { op, left, right } => {
                let left = left.evaluate(scope)?;
                let right = right.evaluate(scope)?;
                Ok(evaluate_binary(&left, &right, *op))
            }
            ExprKind::Logical { op, left, right } => {
                let left = left.evaluate(scope)?;
                let short_circuits = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if short_circuits {
                    Ok(left)
                } else {
                    right.evaluate(scope)
                }
            }
            ExprKind::Unary { op, operand } => Ok(evaluate_unary(&operand.evaluate(scope)?, *op)),
            ExprKind::Conditional {
                condition,
                then,
                otherwise,
            } => {
                if condition.evaluate(scope)?.is_truthy() {
                    then.evaluate(scope)
                } else {
                    otherwise.evaluate(scope)
                }
            }
            ExprKind::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| item.evaluate(scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(items))
            }
            ExprKind::Object(properties) => {
                let mut bag = PropertyBag::new();
                for (name, value) in properties {
                    bag.set(*name, value.evaluate(scope)?);
                }
                Ok(Value::object(bag))
            }
            ExprKind::Member { object, property } => {
                read_member(scope, &object.evaluate(scope)?, *property)
            }
            ExprKind::Index { object, index } => {
                let object = object.evaluate(scope)?;
                let index = index.evaluate(scope)?;
                read_index(scope, &object, &index)
            }
            ExprKind::Call(call) => call.evaluate(scope),
            ExprKind::ApiCall(call) => call.evaluate(scope),
            ExprKind::ConstObjectCall(call) => call.evaluate(scope),
            ExprKind::NativeCall(call) => call.evaluate(scope),
        }
    }
}

/// `object.property`. Absent properties read as `undefined`; reading from
/// `undefined` itself is an error.
fn read_member(scope: &Scope<'_>, object: &Value, property: Name) -> EvalResult {
    let root = scope.root();
    match object {
        Value::Undefined => Err(property_of_undefined(root.interner().lookup(property))),
        Value::Object(properties) => Ok(properties.read().get(property)),
        Value::Array(items) if property == root.length_name() => Ok(length(items.read().len())),
        Value::Str(s) if property == root.length_name() => Ok(length(s.chars().count())),
        Value::Native(native) => Ok(native.constant(property).unwrap_or_default()),
        _ => Ok(Value::Undefined),
    }
}

/// `object[index]`. Out-of-range and non-integral indices read as `undefined`.
fn read_index(scope: &Scope<'_>, object: &Value, index: &Value) -> EvalResult {
    match object {
        Value::Undefined => Err(property_of_undefined(&index.to_string())),
        Value::Array(items) => Ok(array_position(index, items.read().len())
            .and_then(|i| items.read().get(i).cloned())
            .unwrap_or_default()),
        Value::Str(s) => Ok(array_position(index, usize::MAX)
            .and_then(|i| s.chars().nth(i))
            .map(|c| Value::string(c.to_string()))
            .unwrap_or_default()),
        Value::Object(properties) => {
            // A key that was never interned cannot name a property.
            let key = index.to_string();
            Ok(scope
                .root()
                .interner()
                .get(&key)
                .map(|name| properties.read().get(name))
                .unwrap_or_default())
        }
        _ => Ok(Value::Undefined),
    }
}

/// Integral, non-negative index below `len`.
fn array_position(index: &Value, len: usize) -> Option<usize> {
    let n = index.to_number();
    if n.fract() != 0.0 || n < 0.0 || n.is_nan() {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "checked non-negative and integral above"
    )]
    let i = n as usize;
    (i < len).then_some(i)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "script collections stay far below 2^52 elements"
)]
fn length(len: usize) -> Value {
    Value::Number(len as f64)
}
