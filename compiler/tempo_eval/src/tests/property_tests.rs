//! Randomised checks of storage and call invariants.

use proptest::prelude::*;
use tempo_ir::BinaryOp;

use super::{assign, bin, engine, n, param, read, ret};
use crate::{Expr, Stmt, Value, VarRef};

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

proptest! {
    #[test]
    fn global_written_in_one_callback_is_read_in_another(value in finite()) {
        let engine = engine();
        let root = engine.root();
        let shared = root.global_ref("shared");
        let writer = root.define_callback("onWrite", &["v"]);
        let v = VarRef::callback_parameter(&writer, 0).unwrap();
        writer.set_body(assign(&shared, read(&v)));
        let reader = root.define_callback("onRead", &[]);
        reader.set_body(ret(read(&shared)));

        engine.invoke_callback("onWrite", &[n(value)]).unwrap();
        prop_assert_eq!(engine.invoke_callback("onRead", &[]).unwrap(), n(value));
    }

    #[test]
    fn registers_never_alias(values in prop::collection::vec(finite(), 1..16)) {
        let engine = engine();
        let root = engine.root();
        let slots: Vec<VarRef> = (0..values.len())
            .map(|i| root.register_ref(&format!("r{i}")))
            .collect();
        let body = Stmt::block(
            slots
                .iter()
                .zip(&values)
                .map(|(slot, value)| assign(slot, Expr::number(*value)))
                .collect(),
        );
        engine.execute(&body).unwrap();
        for (i, value) in values.iter().enumerate() {
            let index = root.declare_register(&format!("r{i}"));
            prop_assert_eq!(root.register(index), n(*value));
        }
    }

    #[test]
    fn parameters_read_back_the_arguments(a in finite(), b in finite(), c in finite()) {
        let engine = engine();
        let f = engine.root().define_function("triple", &["a", "b", "c"]);
        f.set_body(ret(Expr::array(vec![param(&f, 0), param(&f, 1), param(&f, 2)])));
        let result = engine.call_function("triple", &[n(a), n(b), n(c)]).unwrap();
        let Value::Array(items) = result else {
            return Err(TestCaseError::fail("expected an array"));
        };
        prop_assert_eq!(&*items.read(), &vec![n(a), n(b), n(c)]);
        prop_assert!(!f.is_active());
    }

    #[test]
    fn addition_of_numbers_matches_f64(a in finite(), b in finite()) {
        let engine = engine();
        let result = engine.execute(&ret(bin(BinaryOp::Add, Expr::number(a), Expr::number(b)))).unwrap();
        prop_assert_eq!(result, n(a + b));
    }
}
