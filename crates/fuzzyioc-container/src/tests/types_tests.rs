use super::*;

struct Config {
    port: u16,
}

#[test]
fn test_clone_shares_identity() {
    let a = Type::from_value("A", "function A() {}", 1u32);
    let b = a.clone();
    let c = Type::from_value("A", "function A() {}", 1u32);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_tree_is_parsed_once() {
    let ty = Type::from_value("A", "function A(dep) { dep.x(); }", ());
    let first = ty.tree().expect("parse") as *const SourceTree;
    let second = ty.tree().expect("parse") as *const SourceTree;
    assert_eq!(first, second);
    assert_eq!(ty.tree().expect("parse").file_name(), "A");
}

#[test]
fn test_parse_error_is_cached_and_repeated() {
    let ty = Type::from_value("Broken", "function (", ());
    let first = ty.tree().unwrap_err();
    let second = ty.tree().unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn test_parameters_usage_and_shape() {
    let ty = Type::from_value(
        "Service",
        "function Service(repo) { this.all = function () { return repo.load(); }; }",
        (),
    );
    assert_eq!(ty.parameters().expect("params"), vec!["repo"]);
    assert_eq!(ty.usage().expect("usage")["repo"].methods, vec!["load"]);
    assert!(ty.shape().expect("shape").has_method("all"));
}

#[test]
fn test_from_value_shares_value() {
    let ty = Type::from_value("Config", "function Config() {}", Config { port: 8080 });
    let a = ty.construct(Arguments::default()).expect("construct");
    let b = ty.construct(Arguments::default()).expect("construct");
    assert!(Arc::ptr_eq(&a, &b));
    let config = a.downcast::<Config>().ok().expect("config");
    assert_eq!(config.port, 8080);
}

#[test]
fn test_arguments_typed_access() {
    let args = Arguments::new([Arc::new(7u8) as Instance, Arc::new("text") as Instance]);
    assert_eq!(args.len(), 2);
    assert_eq!(*args.get::<u8>(0).expect("u8"), 7);
    assert_eq!(*args.get::<&str>(1).expect("str"), "text");
}

#[test]
fn test_arguments_errors() {
    let args = Arguments::new([Arc::new(7u8) as Instance]);
    assert!(matches!(
        args.get::<u8>(3),
        Err(FactoryError::MissingArgument { index: 3 })
    ));
    match args.get::<String>(0) {
        Err(FactoryError::ArgumentType { index, expected }) => {
            assert_eq!(index, 0);
            assert!(expected.contains("String"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_debug_shows_name() {
    let ty = Type::from_value("Messages", "function Messages() {}", ());
    assert_eq!(format!("{ty:?}"), "Type(\"Messages\")");
}
