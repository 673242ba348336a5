use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_register_is_idempotent() {
    let mut table = SymbolTable::new(ProgramId::fresh());
    let a = table.register("main");
    let b = table.register("main");
    let c = table.register("other");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_get_does_not_create() {
    let mut table = SymbolTable::new(ProgramId::fresh());
    assert_eq!(table.get("x"), None);
    assert!(table.is_empty());
    let x = table.register("x");
    assert_eq!(table.get("x"), Some(x));
}

#[test]
fn test_name_for() {
    let mut table = SymbolTable::new(ProgramId::fresh());
    let s = table.register("position");
    assert_eq!(table.name(s), Some("position"));
    assert_eq!(table.name_for(s), "position");
}

#[test]
fn test_foreign_symbols_do_not_resolve() {
    let mut a = SymbolTable::new(ProgramId::fresh());
    let mut b = SymbolTable::new(ProgramId::fresh());
    let in_a = a.register("x");
    let in_b = b.register("x");
    assert_ne!(in_a, in_b);
    assert_eq!(b.name(in_a), None);
    assert_eq!(b.name_for(in_a), "$0");
}

#[test]
fn test_iter_in_registration_order() {
    let mut table = SymbolTable::new(ProgramId::fresh());
    table.register("b");
    table.register("a");
    let names: Vec<&str> = table.iter().map(|(_, name)| name).collect();
    assert_eq!(names, vec!["b", "a"]);
}
