//! Tests for the string interner.

use crate::interner::{Atom, Interner};

#[test]
fn test_intern_deduplicates() {
    let mut interner = Interner::new();
    let a = interner.intern("dep");
    let b = interner.intern("dep");
    let c = interner.intern("other");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.resolve(a), "dep");
    assert_eq!(interner.resolve(c), "other");
}

#[test]
fn test_empty_string_is_none_atom() {
    let mut interner = Interner::new();
    assert!(interner.is_empty());
    assert_eq!(interner.intern(""), Atom::NONE);
    assert!(Atom::NONE.is_none());
    assert_eq!(interner.resolve(Atom::NONE), "");
}

#[test]
fn test_lookup_does_not_insert() {
    let mut interner = Interner::new();
    assert_eq!(interner.lookup("missing"), None);
    let len = interner.len();
    assert_eq!(interner.lookup("missing"), None);
    assert_eq!(interner.len(), len);

    let atom = interner.intern("present");
    assert_eq!(interner.lookup("present"), Some(atom));
}

#[test]
fn test_resolve_out_of_bounds() {
    let interner = Interner::new();
    assert_eq!(interner.resolve(Atom(999)), "");
    assert_eq!(interner.try_resolve(Atom(999)), None);
}

#[test]
fn test_intern_common() {
    let mut interner = Interner::new();
    interner.intern_common();
    assert!(interner.lookup("prototype").is_some());
    assert!(interner.lookup("this").is_some());
}
