use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tempo_ir::StringInterner;

use super::*;

#[test]
fn declare_is_idempotent_per_name() {
    let interner = StringInterner::new();
    let register = VarRegister::new();
    let gain = register.declare(interner.intern("gain"));
    let pan = register.declare(interner.intern("pan"));
    assert_ne!(gain, pan);
    assert_eq!(register.declare(interner.intern("gain")), gain);
    assert_eq!(register.len(), 2);
}

#[test]
fn fresh_slot_reads_undefined() {
    let interner = StringInterner::new();
    let register = VarRegister::new();
    let slot = register.declare(interner.intern("x"));
    assert!(register.get(slot).is_undefined());
}

#[test]
fn entries_keep_declaration_order() {
    let interner = StringInterner::new();
    let register = VarRegister::new();
    let a = interner.intern("a");
    let b = interner.intern("b");
    let slot_b = register.declare(b);
    register.declare(a);
    register.set(slot_b, Value::Number(2.0));
    let entries = register.entries();
    assert_eq!(entries[0], (b, Value::Number(2.0)));
    assert_eq!(entries[1], (a, Value::Undefined));
    assert_eq!(register.name(slot_b), Some(b));
}

proptest! {
    /// Writing one slot never changes another.
    #[test]
    fn slots_do_not_alias(values in proptest::collection::vec(-1.0e6f64..1.0e6, 1..24), probe in 0usize..24) {
        let interner = StringInterner::new();
        let register = VarRegister::new();
        let slots: Vec<_> = (0..values.len())
            .map(|i| register.declare(interner.intern(&format!("r{i}"))))
            .collect();
        for (slot, value) in slots.iter().zip(&values) {
            register.set(*slot, Value::Number(*value));
        }
        let probe = probe % slots.len();
        register.set(slots[probe], Value::string("overwritten"));
        for (i, (slot, value)) in slots.iter().zip(&values).enumerate() {
            if i == probe {
                prop_assert_eq!(register.get(*slot), Value::string("overwritten"));
            } else {
                prop_assert_eq!(register.get(*slot), Value::Number(*value));
            }
        }
    }
}
