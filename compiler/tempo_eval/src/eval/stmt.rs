use tempo_value::{ControlSignal, StmtResult, Value};

use crate::ast::{Stmt, StmtKind};
use crate::scope::Scope;
use crate::stack::ensure_sufficient_stack;

use super::locate;

impl Stmt {
    /// Perform against `scope`.
    ///
    /// A `return` stores its value in `return_value` and yields
    /// [`ControlSignal::Return`]; composites stop at the first non-normal
    /// signal and hand it to their parent.
    pub fn perform(&self, scope: &Scope<'_>, return_value: &mut Value) -> StmtResult {
        ensure_sufficient_stack(|| self.perform_inner(scope, return_value))
            .map_err(|error| locate(error, self.location))
    }

    fn perform_inner(&self, scope: &Scope<'_>, return_value: &mut Value) -> StmtResult {
        match &self.kind {
            StmtKind::Expr(expr) => {
                expr.evaluate(scope)?;
                Ok(ControlSignal::Normal)
            }
            StmtKind::Declare { target, init } => {
                let value = match init {
                    Some(init) => init.evaluate(scope)?,
                    None => Value::Undefined,
                };
                target.set(scope, value)?;
                Ok(ControlSignal::Normal)
            }
            StmtKind::Block(statements) => {
                for statement in statements {
                    let signal = statement.perform(scope, return_value)?;
                    if !signal.is_normal() {
                        return Ok(signal);
                    }
                }
                Ok(ControlSignal::Normal)
            }
            StmtKind::If {
                condition,
                then,
                otherwise,
            } => {
                if condition.evaluate(scope)?.is_truthy() {
                    then.perform(scope, return_value)
                } else if let Some(otherwise) = otherwise {
                    otherwise.perform(scope, return_value)
                } else {
                    Ok(ControlSignal::Normal)
                }
            }
            StmtKind::While { condition, body } => {
                while condition.evaluate(scope)?.is_truthy() {
                    match body.perform(scope, return_value)? {
                        ControlSignal::Break => break,
                        ControlSignal::Return => return Ok(ControlSignal::Return),
                        ControlSignal::Normal | ControlSignal::Continue => {}
                    }
                }
                Ok(ControlSignal::Normal)
            }
            StmtKind::For {
                init,
                condition,
                step,
                body,
            } => {
                if let Some(init) = init {
                    init.perform(scope, return_value)?;
                }
                loop {
                    if let Some(condition) = condition {
                        if !condition.evaluate(scope)?.is_truthy() {
                            break;
                        }
                    }
                    match body.perform(scope, return_value)? {
                        ControlSignal::Break => break,
                        ControlSignal::Return => return Ok(ControlSignal::Return),
                        ControlSignal::Normal | ControlSignal::Continue => {}
                    }
                    if let Some(step) = step {
                        step.evaluate(scope)?;
                    }
                }
                Ok(ControlSignal::Normal)
            }
            StmtKind::Return(value) => {
                *return_value = match value {
                    Some(value) => value.evaluate(scope)?,
                    None => Value::Undefined,
                };
                Ok(ControlSignal::Return)
            }
            StmtKind::Break => Ok(ControlSignal::Break),
            StmtKind::Continue => Ok(ControlSignal::Continue),
        }
    }
}
