//! Host entry points: reporting, callbacks, debugger view and teardown.

use std::rc::Rc;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempo_ir::BinaryOp;
use tempo_value::{EvalErrorKind, Value};

use super::{assign, at, bin, engine, n, num, read, ret};
use crate::{
    buffer_reporter, DebugEntry, DebugKind, Engine, Expr, SharedInterner, Stmt, VarRef,
    DEFAULT_MAX_CALL_DEPTH,
};

fn failing_member_read(engine: &Engine, line: u32, column: u32) -> Expr {
    let root = engine.root();
    let missing = root.register_ref("missing");
    Expr::member(read(&missing), root.name("value")).at(line, column)
}

#[test]
fn defaults() {
    let engine = Engine::new();
    assert_eq!(engine.config().max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    assert_eq!(engine.root().max_call_depth(), DEFAULT_MAX_CALL_DEPTH);
    assert!(engine.root().api_class("Console").is_some());
    assert!(engine.root().api_class("Math").is_some());
}

#[test]
fn failures_are_reported_once_and_the_engine_stays_usable() {
    let reporter = buffer_reporter();
    let engine = Engine::builder().reporter(Arc::clone(&reporter)).build();
    let body = Stmt::expr(failing_member_read(&engine, 2, 12));

    assert!(engine.execute(&body).is_err());
    assert_eq!(
        reporter.drain(),
        vec!["Line 2, column 12: cannot read property value of undefined".to_string()]
    );

    assert_eq!(engine.execute(&ret(num(1.0))).unwrap(), n(1.0));
    assert!(reporter.reports().is_empty());
}

#[test]
fn callback_failures_name_the_callback() {
    let reporter = buffer_reporter();
    let engine = Engine::builder().reporter(Arc::clone(&reporter)).build();
    let callback = engine.root().define_callback("onNoteOn", &["note"]);
    callback.set_body(Stmt::expr(failing_member_read(&engine, 3, 4)));

    let err = engine.invoke_callback("onNoteOn", &[n(60.0)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "onNoteOn: Line 3, column 4: cannot read property value of undefined"
    );
    assert_eq!(reporter.reports(), vec![err.to_string()]);
}

#[test]
fn unknown_callback_and_wrong_argument_count() {
    let engine = engine();
    engine.root().define_callback("onTimer", &[]);
    let err = engine.invoke_callback("onControl", &[]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedCallback {
            name: "onControl".to_string()
        }
    );
    let err = engine.invoke_callback("onTimer", &[n(1.0)]).unwrap_err();
    assert_eq!(err.to_string(), "onTimer expects 0 arguments, got 1");
}

#[test]
fn callback_without_body_does_nothing() {
    let engine = engine();
    engine.root().define_callback("onInit", &[]);
    assert_eq!(engine.invoke_callback("onInit", &[]).unwrap(), Value::Undefined);
}

#[test]
fn callback_parameters_bind_per_invocation() {
    let engine = engine();
    let callback = engine.root().define_callback("onController", &["number", "value"]);
    let number = VarRef::callback_parameter(&callback, 0).unwrap();
    let value = VarRef::callback_parameter(&callback, 1).unwrap();
    callback.set_body(ret(bin(
        BinaryOp::Add,
        bin(BinaryOp::Mul, read(&number), num(1000.0)),
        read(&value),
    )));
    assert_eq!(engine.invoke_callback("onController", &[n(7.0), n(64.0)]).unwrap(), n(7064.0));
    assert_eq!(engine.invoke_callback("onController", &[n(1.0), n(2.0)]).unwrap(), n(1002.0));
}

#[test]
fn callback_parameters_are_read_only() {
    let engine = engine();
    let callback = engine.root().define_callback("onNoteOff", &["note"]);
    let note = VarRef::callback_parameter(&callback, 0).unwrap();
    callback.set_body(assign(&note, num(0.0)).at(2, 5));
    let err = engine.invoke_callback("onNoteOff", &[n(60.0)]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ReadOnlyReference {
            name: "note".to_string()
        }
    );
    assert_eq!(err.location, Some(at(2, 5)));
}

#[test]
fn callback_locals_start_fresh_each_invocation() {
    // local seen; if (seen === undefined) { seen = 1; return "fresh"; } return "stale";
    let engine = engine();
    let root = engine.root();
    let callback = root.define_callback("onTimer", &[]);
    let seen = VarRef::callback_local(&callback, root.name("seen"));
    callback.set_body(Stmt::block(vec![
        Stmt::if_then(
            bin(BinaryOp::StrictEq, read(&seen), Expr::undefined()),
            Stmt::block(vec![assign(&seen, num(1.0)), ret(Expr::string("fresh"))]),
        ),
        ret(Expr::string("stale")),
    ]));
    for _ in 0..2 {
        assert_eq!(engine.invoke_callback("onTimer", &[]).unwrap(), Value::string("fresh"));
    }
}

#[test]
fn function_locals_persist_between_calls() {
    // function next() { if (count == undefined) count = 0; count += 1; return count; }
    let engine = engine();
    let root = engine.root();
    let next = root.define_function("next", &[]);
    let count = VarRef::local(&next, root.name("count"));
    next.set_body(Stmt::block(vec![
        Stmt::if_then(
            bin(BinaryOp::Eq, read(&count), Expr::undefined()),
            assign(&count, num(0.0)),
        ),
        Stmt::expr(Expr::compound_assign(count.clone(), BinaryOp::Add, num(1.0))),
        ret(read(&count)),
    ]));
    assert_eq!(engine.call_function("next", &[]).unwrap(), n(1.0));
    assert_eq!(engine.call_function("next", &[]).unwrap(), n(2.0));
    assert_eq!(next.local(root.name("count")), n(2.0));
}

#[test]
fn debug_entries_list_variables_then_functions() {
    let engine = engine();
    let root = engine.root();
    root.set_register(root.declare_register("gain"), n(0.5));
    root.set_global(root.name("tempo"), n(120.0));
    root.set_global(root.name("name"), Value::string("lead"));
    let add = root.define_function("add", &["a", "b"]);
    add.set_body(ret(bin(
        BinaryOp::Add,
        super::param(&add, 0),
        super::param(&add, 1),
    )));
    add.set_comment("Sums two levels.");
    engine.call_function("add", &[n(3.0), n(4.0)]).unwrap();

    let entries = root.debug_entries();
    assert_eq!(
        entries,
        vec![
            DebugEntry::variable(DebugKind::Register, "gain", &n(0.5)),
            DebugEntry::variable(DebugKind::Global, "name", &Value::string("lead")),
            DebugEntry::variable(DebugKind::Global, "tempo", &n(120.0)),
            DebugEntry {
                kind: DebugKind::InlineFunction,
                name: "add(a, b)".to_string(),
                value: "7".to_string(),
                data_type: "number".to_string(),
                description: "Sums two levels.\nParameters: a, b".to_string(),
            },
        ]
    );
}

#[test]
fn dropping_the_engine_frees_self_referencing_functions() {
    let engine = engine();
    let root = engine.root();
    // Mutual recursion: ping calls pong, pong calls ping.
    let ping = root.define_function("ping", &["n"]);
    let pong = root.define_function("pong", &["n"]);
    let to_pong = root.inline_call(&pong, vec![super::param(&ping, 0)], at(1, 1)).unwrap();
    let to_ping = root.inline_call(&ping, vec![super::param(&pong, 0)], at(2, 1)).unwrap();
    ping.set_body(ret(to_pong));
    pong.set_body(Stmt::if_then(
        bin(BinaryOp::Gt, super::param(&pong, 0), num(0.0)),
        ret(to_ping),
    ));
    let weak_ping = Rc::downgrade(&ping);
    let weak_pong = Rc::downgrade(&pong);
    drop((ping, pong));

    drop(engine);
    assert!(weak_ping.upgrade().is_none());
    assert!(weak_pong.upgrade().is_none());
}

#[test]
fn reference_into_a_dropped_engine_is_dangling() {
    let interner = SharedInterner::new();
    let first = Engine::builder().interner(interner.clone()).build();
    let f = first.root().define_function("f", &[]);
    let local = VarRef::local(&f, first.root().name("x"));
    drop(f);
    drop(first);

    let second = Engine::builder()
        .interner(interner)
        .reporter(crate::silent_reporter())
        .build();
    let err = second.execute(&ret(read(&local))).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::DanglingFunction {
            name: "x".to_string()
        }
    );
}

#[test]
fn registers_and_globals_are_separate_namespaces() {
    let engine = engine();
    let root = engine.root();
    let register = root.register_ref("level");
    let global = root.global_ref("level");
    let body = Stmt::block(vec![
        assign(&register, num(1.0)),
        assign(&global, num(2.0)),
        ret(Expr::array(vec![read(&register), read(&global)])),
    ]);
    assert_eq!(engine.execute(&body).unwrap().to_string(), "[1, 2]");
}

#[test]
fn tracing_setup_can_run_more_than_once() {
    crate::init_tracing();
    crate::init_tracing();
    assert_eq!(engine().execute(&ret(num(2.0))).unwrap(), n(2.0));
}
