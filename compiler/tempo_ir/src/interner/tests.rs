use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_intern_same_string_same_name() {
    let interner = StringInterner::new();
    let a = interner.intern("gain");
    let b = interner.intern("gain");
    assert_eq!(a, b);
    assert_eq!(interner.lookup(a), "gain");
}

#[test]
fn test_intern_distinct_strings() {
    let interner = StringInterner::new();
    let a = interner.intern("attack");
    let b = interner.intern("release");
    assert_ne!(a, b);
}

#[test]
fn test_empty_string_is_empty_name() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_keywords_pre_interned() {
    let interner = StringInterner::new();
    assert!(interner.get("onNoteOn").is_some());
    assert!(interner.get("Console").is_some());
    assert!(interner.get("notAKeyword").is_none());
}

#[test]
fn test_unknown_name_resolves_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(u32::MAX)), "");
}

#[test]
fn test_shared_interner_clones_share_table() {
    let interner = SharedInterner::new();
    let other = interner.clone();
    let a = interner.intern("cutoff");
    assert_eq!(other.get("cutoff"), Some(a));
    assert_eq!(other.len(), interner.len());
}
