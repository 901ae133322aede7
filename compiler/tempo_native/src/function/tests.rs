use std::ffi::c_void;

use pretty_assertions::assert_eq;
use tempo_value::{EvalErrorKind, Value};

use super::*;
use crate::StaticSymbols;

extern "C" fn tick() {}

/// Writes 42 into its single argument.
extern "C" fn store_answer(slot: *mut c_void) {
    // SAFETY: the bridge passes a pointer to a live `Value`.
    unsafe { *slot.cast::<Value>() = Value::Number(42.0) };
}

/// Adds the first number into the second.
extern "C" fn accumulate(from: *mut c_void, into: *mut c_void) {
    // SAFETY: both pointers address distinct live `Value`s.
    unsafe {
        let add = (*from.cast::<Value>()).to_number();
        let into = &mut *into.cast::<Value>();
        *into = Value::Number(into.to_number() + add);
    }
}

fn symbols() -> StaticSymbols {
    StaticSymbols::new()
        .symbol("tick", tick as *const c_void)
        .symbol("store_answer", store_answer as *const c_void)
        .symbol("accumulate", accumulate as *const c_void)
}

fn decl(name: &str, args: &[&str], code: &str) -> NativeDecl {
    NativeDecl {
        name: name.to_string(),
        has_return_type: false,
        arguments: args.iter().map(|a| (*a).to_string()).collect(),
        comment: String::new(),
        code: code.to_string(),
    }
}

#[test]
fn zero_argument_snippet_is_callable() {
    let f = NativeFunction::compile(&symbols(), decl("tick", &[], "void tick() {}"));
    assert!(f.state().is_ok());
    assert!(f.call(&mut []).is_ok());
}

#[test]
fn snippet_writes_through_its_argument() {
    let f = NativeFunction::compile(
        &symbols(),
        decl("store_answer", &["slot"], "void store_answer(void* slot) {}"),
    );
    let mut args = [Value::Undefined];
    f.call(&mut args).unwrap();
    assert_eq!(args[0], Value::Number(42.0));
}

#[test]
fn arguments_are_passed_in_order() {
    let f = NativeFunction::compile(
        &symbols(),
        decl("accumulate", &["from", "into"], "void accumulate(void* a, void* b) {}"),
    );
    let mut args = [Value::Number(3.0), Value::Number(4.0)];
    f.call(&mut args).unwrap();
    assert_eq!(args[1], Value::Number(7.0));
    assert_eq!(args[0], Value::Number(3.0));
}

#[test]
fn missing_symbol_fails_every_call() {
    let f = NativeFunction::compile(&symbols(), decl("nope", &[], "void nope() {}"));
    assert!(matches!(f.state(), CompileState::CompileFailed(_)));
    for _ in 0..2 {
        let err = f.call(&mut []).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::UncompiledFunction {
                name: "nope".to_string()
            }
        );
    }
}

#[test]
fn more_than_four_arguments_never_compiles() {
    let f = NativeFunction::compile(
        &symbols(),
        decl("tick", &["a", "b", "c", "d", "e"], "void tick(void* a) {}"),
    );
    assert!(matches!(
        f.state(),
        CompileState::CompileFailed(CompileError::UnsupportedArity { count: 5, .. })
    ));
}

#[test]
fn declared_return_type_is_rejected_at_call() {
    let mut d = decl("store_answer", &["slot"], "float store_answer(void* slot) {}");
    d.has_return_type = true;
    let f = NativeFunction::compile(&symbols(), d);
    let mut args = [Value::Undefined];
    let err = f.call(&mut args).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UnsupportedNativeReturn { .. }));
    // No native call happened.
    assert_eq!(args[0], Value::Undefined);
}

#[test]
fn wrong_argument_count_is_an_arity_error() {
    let f = NativeFunction::compile(
        &symbols(),
        decl("store_answer", &["slot"], "void store_answer(void* slot) {}"),
    );
    let err = f.call(&mut []).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            function: "store_answer".to_string(),
            expected: 1,
            got: 0
        }
    );
}

#[test]
fn signature_comes_from_the_code() {
    assert_eq!(
        derive_signature("void lowpass(void* in, void* out) { *in = 0; }", "lowpass"),
        "lowpass(void* in, void* out)"
    );
    assert_eq!(derive_signature("  float  g()", "g"), "g()");
    assert_eq!(derive_signature("garbage", "h"), "h()");
}

#[test]
fn cc_rejects_garbage_source() {
    // Fails whether or not a C compiler is installed.
    let f = NativeFunction::compile(
        &crate::CcCompiler::new(),
        decl("broken", &[], "void broken( { this is not C"),
    );
    assert!(matches!(f.state(), CompileState::CompileFailed(_)));
    let err = f.call(&mut []).unwrap_err();
    assert!(err.to_string().contains("broken"));
}

#[test]
fn construction_leaves_a_terminal_state() {
    let compiled = NativeFunction::compile(&symbols(), decl("tick", &[], "void tick() {}"));
    let missing = NativeFunction::compile(&symbols(), decl("nope", &[], "void nope() {}"));
    let too_wide = NativeFunction::compile(
        &symbols(),
        decl("tick", &["a", "b", "c", "d", "e"], "void tick() {}"),
    );
    for function in [&compiled, &missing, &too_wide] {
        assert!(
            matches!(
                function.state(),
                CompileState::CompiledOk(_) | CompileState::CompileFailed(_)
            ),
            "{function:?}"
        );
    }
    assert!(compiled.state().is_ok());
    assert!(matches!(
        too_wide.state(),
        CompileState::CompileFailed(CompileError::UnsupportedArity { count: 5, max: 4, .. })
    ));
}
