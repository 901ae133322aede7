//! Cross-module evaluation tests.
//!
//! Trees are built by hand through the same binding methods a script front
//! end uses. Helpers below keep them readable.

mod call_tests;
mod engine_tests;
mod property_tests;
mod scenario_tests;

use std::rc::Rc;

use tempo_ir::{BinaryOp, CodeLocation};
use tempo_value::Value;

use crate::{
    buffer_handler, buffer_reporter, Engine, Expr, FunctionInstance, StaticSymbols, Stmt, VarRef,
};

/// Engine with captured output and reports, and no C compiler.
pub(crate) fn engine() -> Engine {
    Engine::builder()
        .reporter(buffer_reporter())
        .print_handler(buffer_handler())
        .snippet_compiler(StaticSymbols::new())
        .build()
}

pub(crate) fn at(line: u32, column: u32) -> CodeLocation {
    CodeLocation::new(line, column)
}

pub(crate) fn num(n: f64) -> Expr {
    Expr::number(n)
}

pub(crate) fn read(target: &VarRef) -> Expr {
    Expr::var(target.clone())
}

pub(crate) fn param(function: &Rc<FunctionInstance>, index: usize) -> Expr {
    Expr::var(VarRef::parameter(function, index).unwrap())
}

pub(crate) fn bin(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::binary(op, left, right)
}

pub(crate) fn assign(target: &VarRef, value: Expr) -> Stmt {
    Stmt::expr(Expr::assign(target.clone(), value))
}

pub(crate) fn ret(value: Expr) -> Stmt {
    Stmt::ret(Some(value))
}

pub(crate) fn n(value: f64) -> Value {
    Value::Number(value)
}
