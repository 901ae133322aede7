//! Tree-walking evaluation.
//!
//! `Expr::evaluate(scope)` produces a value and `Stmt::perform(scope,
//! return_value)` produces a [`ControlSignal`](tempo_value::ControlSignal).
//! Both recurse into children in source order. Errors propagate with `?`;
//! each node stamps its location on errors that do not carry one yet, so
//! the reported location is the innermost node that failed.

mod call;
mod expr;
mod stmt;

use tempo_ir::CodeLocation;
use tempo_value::EvalError;

/// Claim `error` for the node at `location` unless a child already did.
#[inline]
fn locate(error: EvalError, location: CodeLocation) -> EvalError {
    if location.is_known() {
        error.with_location(location)
    } else {
        error
    }
}
