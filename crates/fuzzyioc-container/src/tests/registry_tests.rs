use super::*;

fn registered(name: &str, source: &str, registry: &mut Registry) -> Type {
    let ty = Type::from_value(name, source, ());
    let shape = ty.shape().expect("shape");
    registry.insert(&ty, &shape);
    ty
}

#[test]
fn test_method_and_member_indices() {
    let mut registry = Registry::new();
    let a = registered("A", "function A() { this.foo = function () {}; }", &mut registry);
    let b = registered("B", "function B() { this.bar = 5; }", &mut registry);

    assert_eq!(registry.methods_for("foo"), &[a.clone()]);
    assert!(registry.members_for("foo").is_empty());
    assert_eq!(registry.members_for("bar"), &[b.clone()]);
    assert!(registry.methods_for("bar").is_empty());
    assert_eq!(registry.types(), &[a, b]);
}

#[test]
fn test_registration_order_preserved() {
    let mut registry = Registry::new();
    let first = registered("First", "function First() { this.run = function () {}; }", &mut registry);
    let second = registered("Second", "function Second() { this.run = () => 1; }", &mut registry);
    assert_eq!(registry.methods_for("run"), &[first, second]);
}

#[test]
fn test_duplicate_registration_duplicates_entries() {
    let mut registry = Registry::new();
    let ty = registered("A", "function A() { this.x = 1; }", &mut registry);
    let shape = ty.shape().expect("shape");
    registry.insert(&ty, &shape);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.members_for("x"), &[ty.clone(), ty]);
}

#[test]
fn test_empty_shape_is_listed_but_not_indexed() {
    let mut registry = Registry::new();
    registered("Empty", "function Empty() {}", &mut registry);
    assert_eq!(registry.len(), 1);
    assert!(registry.members_for("anything").is_empty());
    assert!(registry.methods_for("anything").is_empty());
}
