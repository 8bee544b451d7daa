use fuzzyioc_parser::{SourceTree, syntax_kind_ext, walk};

#[test]
fn test_preorder_starts_at_root() {
    let tree = SourceTree::parse("test.js", "a.b;").expect("parse");
    let order = walk::preorder(tree.arena(), tree.root());
    assert_eq!(order.first(), Some(&tree.root()));
    assert_eq!(order.len(), tree.arena().len());
}

#[test]
fn test_preorder_visits_children_in_source_order() {
    let tree = SourceTree::parse("test.js", "first(); second(); third();").expect("parse");
    let arena = tree.arena();
    let names: Vec<_> = walk::preorder(arena, tree.root())
        .into_iter()
        .filter_map(|idx| arena.identifier_text(idx))
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn test_parent_before_child() {
    let tree = SourceTree::parse("test.js", "function f(a) { return a.x; }").expect("parse");
    let arena = tree.arena();
    let order = walk::preorder(arena, tree.root());
    let position = |idx| order.iter().position(|&i| i == idx).expect("visited");
    for &idx in &order {
        let parent = arena.parent_of(idx);
        if parent.is_some() {
            assert!(position(parent) < position(idx));
        }
    }
}

#[test]
fn test_do_while_body_before_condition() {
    let tree = SourceTree::parse("test.js", "do { body(); } while (cond);").expect("parse");
    let arena = tree.arena();
    let names: Vec<_> = walk::preorder(arena, tree.root())
        .into_iter()
        .filter_map(|idx| arena.identifier_text(idx))
        .collect();
    assert_eq!(names, vec!["body", "cond"]);
}

#[test]
fn test_for_each_preorder_matches_preorder() {
    let tree = SourceTree::parse("test.js", "var o = { a: [1, 2], b: x ? y : z };").expect("parse");
    let mut visited = Vec::new();
    walk::for_each_preorder(tree.arena(), tree.root(), |idx, _| visited.push(idx));
    assert_eq!(visited, walk::preorder(tree.arena(), tree.root()));
}

#[test]
fn test_first_function_like_is_outermost() {
    let source = "var x = 1;\nfunction Outer(a) { var inner = function (b) {}; }\nfunction Later() {}";
    let tree = SourceTree::parse("test.js", source).expect("parse");
    let arena = tree.arena();
    let first = walk::first_function_like(arena, tree.root()).expect("function");
    assert_eq!(
        arena.get(first).map(|n| n.kind),
        Some(syntax_kind_ext::FUNCTION_DECLARATION)
    );
    assert_eq!(arena.parameter_names(first), vec!["a"]);
}

#[test]
fn test_first_function_like_finds_arrow() {
    let tree = SourceTree::parse("test.js", "var f = (repo) => repo.load();").expect("parse");
    let arena = tree.arena();
    let first = walk::first_function_like(arena, tree.root()).expect("function");
    assert_eq!(arena.parameter_names(first), vec!["repo"]);
}

#[test]
fn test_first_function_like_none() {
    let tree = SourceTree::parse("test.js", "var x = 1 + 2;").expect("parse");
    assert!(walk::first_function_like(tree.arena(), tree.root()).is_none());
}
