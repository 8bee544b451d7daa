//! Resolution of dependency graphs through a `Container`.

use fuzzyioc_common::limits::MAX_RESOLVE_DEPTH;
use fuzzyioc_container::{Container, ContainerError, FactoryError, Instance, Type};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Named(&'static str);

fn named(name: &'static str, source: &str) -> Type {
    Type::new(name, source, move |_| Ok(Arc::new(Named(name)) as Instance))
}

/// Builds a `Named` holding the name of its first argument.
fn holder(name: &'static str, source: &str) -> Type {
    Type::new(name, source, |args| {
        let dep = args.get::<Named>(0)?;
        Ok(Arc::new(Named(dep.0)) as Instance)
    })
}

#[test]
fn test_member_and_method_beats_partial_match() {
    let mut container = Container::new();
    container
        .register(&named("MethodOnly", "function MethodOnly() { this.go = function () {}; }"))
        .expect("register");
    container
        .register(&named("MemberOnly", "function MemberOnly() { this.size = 3; }"))
        .expect("register");
    container
        .register(&named(
            "Both",
            "function Both() { this.size = 3; this.go = function () {}; }",
        ))
        .expect("register");

    let target = holder("Target", "function Target(dep) { if (dep.size > 0) dep.go(); }");
    let instance = container.resolve_as::<Named>(&target).expect("resolve");
    assert_eq!(instance.0, "Both");
}

#[test]
fn test_first_registered_wins_on_tie() {
    let mut container = Container::new();
    container
        .register(&named("First", "function First() { this.go = function () {}; }"))
        .expect("register");
    container
        .register(&named("Second", "function Second() { this.go = function () {}; }"))
        .expect("register");

    let target = holder("Target", "function Target(dep) { dep.go(); }");
    assert_eq!(container.resolve_as::<Named>(&target).expect("resolve").0, "First");
}

#[test]
fn test_unsatisfied_builds_nothing() {
    let built = Arc::new(AtomicUsize::new(0));
    let counting = |name: &'static str, source: &str| {
        let built = Arc::clone(&built);
        Type::new(name, source, move |_| {
            built.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(()) as Instance)
        })
    };

    let mut container = Container::new();
    container
        .register(&counting(
            "Middle",
            "function Middle(missing) { this.work = function () { missing.nothingHasThis(); }; }",
        ))
        .expect("register");
    container
        .register(&counting("Leaf", "function Leaf() { this.unused = 1; }"))
        .expect("register");

    let top = counting("Top", "function Top(dep) { dep.work(); }");
    let err = container.resolve(&top).unwrap_err();
    match err {
        ContainerError::UnsatisfiedDependency {
            type_name,
            dependency,
            methods,
            members,
        } => {
            assert_eq!(type_name, "Middle");
            assert_eq!(dependency, "missing");
            assert_eq!(methods, vec!["nothingHasThis"]);
            assert!(members.is_empty());
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(built.load(Ordering::SeqCst), 0);
}

#[test]
fn test_two_type_cycle() {
    let mut container = Container::new();
    let a = named("A", "function A(b) { this.ping = function () { b.pong(); }; }");
    let b = named("B", "function B(a) { this.pong = function () { a.ping(); }; }");
    container.register(&a).expect("register");
    container.register(&b).expect("register");

    match container.resolve(&a) {
        Err(ContainerError::CyclicDependency { path }) => {
            assert_eq!(path, vec!["A", "B", "A"]);
        }
        other => panic!("unexpected: {other:?}"),
    }
    let message = container.resolve(&b).unwrap_err().to_string();
    assert_eq!(message, "cyclic dependency: B -> A -> B");
}

#[test]
fn test_unregistered_target_cycle_through_registered() {
    let mut container = Container::new();
    let a = named("A", "function A(b) { this.ping = function () { b.pong(); }; }");
    let b = named("B", "function B(a) { this.pong = function () { a.ping(); }; }");
    container.register(&a).expect("register");
    container.register(&b).expect("register");

    let top = holder("Top", "function Top(x) { x.ping(); }");
    match container.resolve(&top) {
        Err(ContainerError::CyclicDependency { path }) => {
            assert_eq!(path, vec!["A", "B", "A"]);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_no_memoization() {
    let mut container = Container::new();
    container
        .register(&named("Dep", "function Dep() { this.go = function () {}; }"))
        .expect("register");
    let target = Type::new("Target", "function Target(dep) { dep.go(); }", |args| {
        Ok(args.instance(0)?.clone())
    });

    let first = container.resolve(&target).expect("first");
    let second = container.resolve(&target).expect("second");
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_arguments_in_parameter_order() {
    let mut container = Container::new();
    container
        .register(&named("Log", "function Log() { this.info = function () {}; }"))
        .expect("register");
    container
        .register(&named("Repo", "function Repo() { this.all = function () {}; }"))
        .expect("register");

    let target = Type::new(
        "Service",
        "function Service(repo, log) { log.info(); repo.all(); }",
        |args| {
            let names: Vec<&'static str> = (0..args.len())
                .map(|i| args.get::<Named>(i).map(|n| n.0))
                .collect::<Result<_, _>>()?;
            Ok(Arc::new(names) as Instance)
        },
    );
    let names = container
        .resolve_as::<Vec<&'static str>>(&target)
        .expect("resolve");
    assert_eq!(*names, vec!["Repo", "Log"]);
}

#[test]
fn test_factory_failure_surfaces() {
    let mut container = Container::new();
    container
        .register(&Type::new(
            "Flaky",
            "function Flaky() { this.go = function () {}; }",
            |_| Err(FactoryError::custom("database offline")),
        ))
        .expect("register");
    let target = holder("Target", "function Target(dep) { dep.go(); }");

    match container.resolve(&target) {
        Err(ContainerError::ConstructionFailed { type_name, source }) => {
            assert_eq!(type_name, "Flaky");
            assert_eq!(source.to_string(), "database offline");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_factory_argument_type_error() {
    let mut container = Container::new();
    container
        .register(&Type::from_value(
            "Number",
            "function Number() { this.go = function () {}; }",
            7u32,
        ))
        .expect("register");
    let target = holder("Target", "function Target(dep) { dep.go(); }");
    assert!(matches!(
        container.resolve(&target),
        Err(ContainerError::ConstructionFailed {
            source: FactoryError::ArgumentType { index: 0, .. },
            ..
        })
    ));
}

#[test]
fn test_deep_acyclic_chain_is_bounded() {
    let mut container = Container::new();
    let count = MAX_RESOLVE_DEPTH as usize + 2;
    for i in 0..count {
        let source = format!(
            "function Link{i}(next) {{ this.step{i} = function () {{ next.step{}(); }}; }}",
            i + 1
        );
        container
            .register(&named("Link", &source))
            .expect("register");
    }
    let head = holder("Head", "function Head(first) { first.step0(); }");
    assert!(matches!(
        container.resolve(&head),
        Err(ContainerError::ResolutionTooDeep { depth }) if depth == MAX_RESOLVE_DEPTH
    ));
}

#[test]
fn test_independent_containers() {
    let mut left = Container::new();
    let right = Container::new();
    left.register(&named("Dep", "function Dep() { this.go = function () {}; }"))
        .expect("register");
    let target = holder("Target", "function Target(dep) { dep.go(); }");

    assert!(left.resolve(&target).is_ok());
    assert!(matches!(
        right.resolve(&target),
        Err(ContainerError::UnsatisfiedDependency { .. })
    ));
}
