//! Inline function calls and the shared per-function frame.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use tempo_ir::BinaryOp;
use tempo_value::{EvalErrorKind, Value};

use super::{at, bin, engine, n, num, param, ret};
use crate::{Engine, Expr, FunctionInstance, Stmt};

/// `function add(a, b) { return a + b; }`
fn define_add(engine: &Engine) -> Rc<FunctionInstance> {
    let add = engine.root().define_function("add", &["a", "b"]);
    add.set_body(ret(bin(BinaryOp::Add, param(&add, 0), param(&add, 1))));
    add
}

/// `function fact(n) { if (n <= 1) return 1; return <recursive step>; }`
fn define_fact(engine: &Engine, call_on_left: bool) -> Rc<FunctionInstance> {
    let root = engine.root();
    let fact = root.define_function("fact", &["n"]);
    let recurse = root
        .inline_call(
            &fact,
            vec![bin(BinaryOp::Sub, param(&fact, 0), num(1.0))],
            at(3, 20),
        )
        .unwrap();
    let step = if call_on_left {
        bin(BinaryOp::Mul, recurse, param(&fact, 0))
    } else {
        bin(BinaryOp::Mul, param(&fact, 0), recurse)
    };
    fact.set_body(Stmt::block(vec![
        Stmt::if_then(bin(BinaryOp::LtEq, param(&fact, 0), num(1.0)), ret(num(1.0))),
        ret(step),
    ]));
    fact
}

#[test]
fn script_call_returns_the_body_result() {
    let engine = engine();
    let add = define_add(&engine);
    let call = engine
        .root()
        .inline_call(&add, vec![num(3.0), num(4.0)], at(1, 1))
        .unwrap();
    assert_eq!(engine.execute(&ret(call)).unwrap(), n(7.0));
    assert_eq!(add.last_return_value(), n(7.0));
    assert!(!add.is_active());
}

#[test]
fn parameters_bind_in_declaration_order() {
    let engine = engine();
    let f = engine.root().define_function("digits", &["a", "b", "c"]);
    f.set_body(ret(Expr::array(vec![
        param(&f, 0),
        param(&f, 1),
        param(&f, 2),
    ])));
    let result = engine.call_function("digits", &[n(1.0), n(2.0), n(3.0)]).unwrap();
    assert_eq!(result.to_string(), "[1, 2, 3]");
}

#[test]
fn arguments_are_evaluated_in_the_caller_scope() {
    // function double(y) { return y * 2; }
    // function outer(x) { return double(x + 1); }
    let engine = engine();
    let root = engine.root();
    let double = root.define_function("double", &["y"]);
    double.set_body(ret(bin(BinaryOp::Mul, param(&double, 0), num(2.0))));
    let outer = root.define_function("outer", &["x"]);
    let inner_call = root
        .inline_call(
            &double,
            vec![bin(BinaryOp::Add, param(&outer, 0), num(1.0))],
            at(2, 30),
        )
        .unwrap();
    outer.set_body(ret(inner_call));
    assert_eq!(engine.call_function("outer", &[n(3.0)]).unwrap(), n(8.0));
}

#[test]
fn first_return_in_source_order_wins() {
    let engine = engine();
    let f = engine.root().define_function("pick", &[]);
    f.set_body(Stmt::block(vec![
        Stmt::if_then(Expr::literal(true), ret(num(1.0))),
        ret(num(2.0)),
    ]));
    assert_eq!(engine.call_function("pick", &[]).unwrap(), n(1.0));
}

#[test]
fn body_without_return_yields_undefined() {
    let engine = engine();
    let f = engine.root().define_function("noop", &["x"]);
    f.set_body(Stmt::expr(param(&f, 0)));
    assert_eq!(engine.call_function("noop", &[n(5.0)]).unwrap(), Value::Undefined);
}

#[test]
fn reentrant_call_overwrites_the_shared_frame() {
    // function f(n) { if (n == 1) f(2); return n; }
    let engine = engine();
    let root = engine.root();
    let f = root.define_function("f", &["n"]);
    let inner = root.inline_call(&f, vec![num(2.0)], at(1, 28)).unwrap();
    f.set_body(Stmt::block(vec![
        Stmt::if_then(
            bin(BinaryOp::Eq, param(&f, 0), num(1.0)),
            Stmt::expr(inner),
        ),
        ret(param(&f, 0)),
    ]));
    assert_eq!(engine.call_function("f", &[n(1.0)]).unwrap(), n(2.0));
    assert!(!f.is_active());
}

#[test]
fn recursion_reads_parameter_before_the_nested_call() {
    let engine = engine();
    define_fact(&engine, false);
    assert_eq!(engine.call_function("fact", &[n(3.0)]).unwrap(), n(6.0));
    assert_eq!(engine.call_function("fact", &[n(5.0)]).unwrap(), n(120.0));
}

#[test]
fn recursion_reading_parameter_after_the_nested_call_sees_innermost_argument() {
    let engine = engine();
    define_fact(&engine, true);
    assert_eq!(engine.call_function("fact", &[n(3.0)]).unwrap(), n(1.0));
}

#[test]
fn runaway_recursion_hits_the_depth_limit() {
    let engine = Engine::builder()
        .max_call_depth(16)
        .reporter(crate::silent_reporter())
        .build();
    let root = engine.root();
    let f = root.define_function("forever", &[]);
    let again = root.inline_call(&f, vec![], at(1, 30)).unwrap();
    f.set_body(ret(again));
    let err = engine.call_function("forever", &[]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 16 });
    assert_eq!(err.location, Some(at(1, 30)));
    assert_eq!(err.context.as_deref(), Some("forever()"));
    assert!(!f.is_active());
}

#[test]
fn binding_checks_argument_count() {
    let engine = engine();
    let add = define_add(&engine);
    let err = engine.root().inline_call(&add, vec![], at(4, 2)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            function: "add".to_string(),
            expected: 2,
            got: 0,
        }
    );
    assert_eq!(err.to_string(), "Line 4, column 2: add expects 2 arguments, got 0");
}

#[test]
fn host_call_checks_argument_count_and_name() {
    let engine = engine();
    define_add(&engine);
    let err = engine.call_function("add", &[n(1.0)]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ArityMismatch { expected: 2, got: 1, .. }));
    let err = engine.call_function("missing", &[]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedFunction {
            name: "missing".to_string()
        }
    );
}

#[test]
fn error_inside_body_carries_signature_context() {
    let engine = engine();
    let root = engine.root();
    let f = root.define_function("probe", &["x"]);
    let missing = root.register_ref("missing");
    f.set_body(ret(
        Expr::member(super::read(&missing), root.name("value")).at(2, 9),
    ));
    let err = engine.call_function("probe", &[n(1.0)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "probe(x): Line 2, column 9: cannot read property value of undefined"
    );
    assert!(!f.is_active());
}

#[test]
fn parameter_outside_a_call_is_an_error() {
    let engine = engine();
    let add = define_add(&engine);
    let err = engine.execute(&ret(param(&add, 0).at(6, 3))).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ParameterOutsideCall {
            name: "a".to_string()
        }
    );
    assert_eq!(err.location, Some(at(6, 3)));
}
