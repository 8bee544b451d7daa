use super::*;

fn shape(source: &str) -> Shape {
    shape_of_source(source).expect("shape should compute")
}

#[test]
fn test_function_value_is_method() {
    let s = shape("function A() { this.foo = function () {}; this.bar = 5; }");
    assert!(s.has_method("foo"));
    assert!(!s.has_member("foo"));
    assert!(s.has_member("bar"));
    assert!(!s.has_method("bar"));
}

#[test]
fn test_arrow_and_parenthesized_functions_are_methods() {
    let s = shape("function A() { this.a = () => 1; this.b = (function () {}); }");
    assert_eq!(s.methods.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(s.members.is_empty());
}

#[test]
fn test_prototype_definitions_count() {
    let s = shape(
        "function Repo() { this.items = []; }\nRepo.prototype.all = function () { return this.items; };\nRepo.prototype.limit = 10;",
    );
    assert_eq!(s.methods.iter().collect::<Vec<_>>(), vec!["all"]);
    assert_eq!(s.members.iter().collect::<Vec<_>>(), vec!["items", "limit"]);
}

#[test]
fn test_nested_assignments_count() {
    let s = shape("function A() { if (x) { this.deep = function () { this.deeper = 1; }; } }");
    assert!(s.has_method("deep"));
    assert!(s.has_member("deeper"));
}

#[test]
fn test_deduplicated_in_discovery_order() {
    let s = shape("function A() { this.b = 1; this.a = 2; this.b = 3; }");
    assert_eq!(s.members.iter().collect::<Vec<_>>(), vec!["b", "a"]);
}

#[test]
fn test_name_in_both_sets() {
    let s = shape("function A() { this.x = 1; this.x = function () {}; }");
    assert!(s.has_member("x"));
    assert!(s.has_method("x"));
}

#[test]
fn test_compound_assignment_counts_as_member() {
    let s = shape("function A() { this.count += 1; }");
    assert!(s.has_member("count"));
}

#[test]
fn test_element_and_foreign_assignments_ignored() {
    let s = shape("function A(o) { this['x'] = 1; o.y = 2; self.z = 3; }");
    assert!(s.is_empty());
}

#[test]
fn test_source_without_function_has_shape() {
    assert!(shape("").is_empty());
    let s = shape("Thing.prototype.go = function () {};");
    assert!(s.has_method("go"));
}

#[test]
fn test_parse_error_fails() {
    assert!(matches!(
        shape_of_source("this.x = ;"),
        Err(AnalyzeError::Parse(_))
    ));
}
