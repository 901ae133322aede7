//! End-to-end scenarios in the shape a script front end produces.

use pretty_assertions::assert_eq;
use tempo_ir::BinaryOp;

use super::{assign, at, bin, engine, n, num, param, read, ret};
use crate::{Stmt, Value, VarRef};

#[test]
fn callbacks_share_globals() {
    // global x = 1;
    // onA() { x = x + 1; }
    // onB() { return x; }
    let engine = engine();
    let root = engine.root();
    let x = root.global_ref("x");
    engine.execute(&Stmt::declare(x.clone(), Some(num(1.0)))).unwrap();

    let on_a = root.define_callback("onA", &[]);
    on_a.set_body(assign(&x, bin(BinaryOp::Add, read(&x), num(1.0))));
    let on_b = root.define_callback("onB", &[]);
    on_b.set_body(ret(read(&x)));

    engine.invoke_callback("onA", &[]).unwrap();
    assert_eq!(engine.invoke_callback("onB", &[]).unwrap(), n(2.0));
}

#[test]
fn note_handler_drives_helper_functions() {
    // reg velocityScale = 0.5;
    // function scale(v) { return v * velocityScale; }
    // onNoteOn(note, velocity) {
    //     local scaled = scale(velocity);
    //     if (note >= 60) return Math.round(scaled);
    //     return 0;
    // }
    let engine = engine();
    let root = engine.root();
    let velocity_scale = root.register_ref("velocityScale");
    engine
        .execute(&Stmt::declare(velocity_scale.clone(), Some(num(0.5))))
        .unwrap();

    let scale = root.define_function("scale", &["v"]);
    scale.set_body(ret(bin(BinaryOp::Mul, param(&scale, 0), read(&velocity_scale))));

    let on_note_on = root.define_callback("onNoteOn", &["note", "velocity"]);
    let note = VarRef::callback_parameter(&on_note_on, 0).unwrap();
    let velocity = VarRef::callback_parameter(&on_note_on, 1).unwrap();
    let scaled = VarRef::callback_local(&on_note_on, root.name("scaled"));
    let call_scale = root.inline_call(&scale, vec![read(&velocity)], at(4, 20)).unwrap();
    let round = root
        .api_call("Math", "round", vec![read(&scaled)], at(5, 31))
        .unwrap();
    on_note_on.set_body(Stmt::block(vec![
        Stmt::declare(scaled.clone(), Some(call_scale)),
        Stmt::if_then(bin(BinaryOp::GtEq, read(&note), num(60.0)), ret(round)),
        ret(num(0.0)),
    ]));

    assert_eq!(engine.invoke_callback("onNoteOn", &[n(64.0), n(101.0)]).unwrap(), n(51.0));
    assert_eq!(engine.invoke_callback("onNoteOn", &[n(40.0), n(101.0)]).unwrap(), n(0.0));
    assert_eq!(on_note_on.local(root.name("scaled")), n(50.5));
    assert_eq!(scale.last_return_value(), n(50.5));
}

#[test]
fn print_from_a_callback() {
    let output = crate::buffer_handler();
    let engine = crate::Engine::builder()
        .print_handler(std::sync::Arc::clone(&output))
        .build();
    let root = engine.root();
    let on_init = root.define_callback("onInit", &[]);
    let print = root
        .api_call(
            "Console",
            "print",
            vec![bin(BinaryOp::Add, crate::Expr::string("voices: "), num(8.0))],
            at(1, 1),
        )
        .unwrap();
    on_init.set_body(Stmt::expr(print));
    assert_eq!(engine.invoke_callback("onInit", &[]).unwrap(), Value::Undefined);
    assert_eq!(output.output(), "voices: 8\n");
}
