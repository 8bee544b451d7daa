//! End-to-end resolution scenarios.
//!
//! Each scenario registers types the way a host application would (source
//! text plus a factory) and resolves an unregistered entry point.

use fuzzyioc::{Container, ContainerError, Instance, Type};
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// Messages / View
// =============================================================================

struct Messages {
    by_key: HashMap<String, String>,
}

impl Messages {
    fn get_message_by_key(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }
}

struct View {
    msgs: Arc<Messages>,
}

impl View {
    fn render(&self) -> Option<&str> {
        self.msgs.get_message_by_key("some.message.key")
    }
}

const MESSAGES_SOURCE: &str = r#"
function Messages() {
    var keys = { "some.message.key": "Yeah!" };

    this.getMessageByKey = function (key) {
        return keys[key];
    };
}
"#;

const VIEW_SOURCE: &str = r#"
function View(msgs) {
    this.msgs = msgs;
}

View.prototype.render = function () {
    return this.msgs.getMessageByKey("some.message.key");
};
"#;

fn messages_type() -> Type {
    let mut by_key = HashMap::new();
    by_key.insert("some.message.key".to_string(), "Yeah!".to_string());
    Type::from_value("Messages", MESSAGES_SOURCE, Messages { by_key })
}

fn view_type() -> Type {
    Type::new("View", VIEW_SOURCE, |args| {
        Ok(Arc::new(View {
            msgs: args.get::<Messages>(0)?,
        }) as Instance)
    })
}

#[test]
fn test_view_gets_messages() {
    fuzzyioc::tracing_config::init_tracing();

    let mut container = Container::new();
    container.register(&messages_type()).expect("register Messages");

    let view = container.resolve_as::<View>(&view_type()).expect("resolve View");
    assert_eq!(view.render(), Some("Yeah!"));
}

#[test]
fn test_view_usage_goes_through_alias() {
    let container = Container::new();
    let record = container.analyze_usage(&view_type()).expect("usage");
    assert_eq!(record["msgs"].methods, vec!["getMessageByKey"]);
    assert!(record["msgs"].members.is_empty());
}

#[test]
fn test_view_without_messages_fails() {
    let container = Container::new();
    let err = container.resolve(&view_type()).unwrap_err();
    assert!(matches!(
        err,
        ContainerError::UnsatisfiedDependency { ref dependency, .. } if dependency == "msgs"
    ));
    let message = err.to_string();
    assert!(message.contains("Methods called: [getMessageByKey]"), "{message}");
}

// =============================================================================
// UserRepo -> UserService -> UserController
// =============================================================================

struct UserRepo;

impl UserRepo {
    fn all_users(&self) -> Vec<String> {
        vec!["alice".to_string(), "bob".to_string()]
    }
}

struct UserService {
    repo: Arc<UserRepo>,
}

impl UserService {
    fn find_all_users(&self) -> Vec<String> {
        self.repo.all_users()
    }
}

struct UserController {
    service: Arc<UserService>,
}

impl UserController {
    fn index(&self) -> Vec<String> {
        self.service.find_all_users()
    }
}

fn user_types() -> (Type, Type, Type) {
    let repo = Type::new(
        "UserRepo",
        "function UserRepo() { this.allUsers = function () { return ['alice', 'bob']; }; }",
        |_| Ok(Arc::new(UserRepo) as Instance),
    );
    let service = Type::new(
        "UserService",
        r"
function UserService(repo) {
    this.findAllUsers = function () {
        return repo.allUsers();
    };
}
",
        |args| {
            Ok(Arc::new(UserService {
                repo: args.get::<UserRepo>(0)?,
            }) as Instance)
        },
    );
    let controller = Type::new(
        "UserController",
        r"
function UserController(service) {
    this.index = function () {
        return service.findAllUsers();
    };
}
",
        |args| {
            Ok(Arc::new(UserController {
                service: args.get::<UserService>(0)?,
            }) as Instance)
        },
    );
    (repo, service, controller)
}

#[test]
fn test_multi_hop_resolution() {
    let (repo, service, controller) = user_types();
    let mut container = Container::new();
    container.register(&repo).expect("register repo");
    container.register(&service).expect("register service");

    let resolved = container
        .resolve_as::<UserController>(&controller)
        .expect("resolve controller");
    assert_eq!(resolved.index(), vec!["alice", "bob"]);
}

#[test]
fn test_registration_order_does_not_matter_for_distinct_shapes() {
    let (repo, service, controller) = user_types();
    let mut container = Container::new();
    container.register(&service).expect("register service");
    container.register(&repo).expect("register repo");

    let resolved = container
        .resolve_as::<UserController>(&controller)
        .expect("resolve controller");
    assert_eq!(resolved.index(), vec!["alice", "bob"]);
}

#[test]
fn test_missing_link_fails_whole_chain() {
    let (_, service, controller) = user_types();
    let mut container = Container::new();
    container.register(&service).expect("register service");

    match container.resolve(&controller) {
        Err(ContainerError::UnsatisfiedDependency {
            type_name,
            dependency,
            methods,
            ..
        }) => {
            assert_eq!(type_name, "UserService");
            assert_eq!(dependency, "repo");
            assert_eq!(methods, vec!["allUsers"]);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("resolution should fail"),
    }
}

#[test]
fn test_listed_types() {
    let (repo, service, _) = user_types();
    let mut container = Container::new();
    container.register(&repo).expect("register repo");
    container.register(&service).expect("register service");
    let names: Vec<_> = container.types().iter().map(|t| t.name().to_string()).collect();
    assert_eq!(names, vec!["UserRepo", "UserService"]);
}

// =============================================================================
// Shape selection
// =============================================================================

#[test]
fn test_member_and_method_required_together() {
    let mut container = Container::new();
    let cache = Type::from_value(
        "Cache",
        "function Cache() { this.get = function (k) {}; }",
        "cache",
    );
    let store = Type::from_value(
        "Store",
        "function Store() { this.get = function (k) {}; this.size = 0; }",
        "store",
    );
    container.register(&cache).expect("register");
    container.register(&store).expect("register");

    let report = Type::new(
        "Report",
        "function Report(source) { if (source.size) { source.get('total'); } }",
        |args| Ok(args.instance(0)?.clone()),
    );
    let picked = container.resolve_as::<&str>(&report).expect("resolve");
    assert_eq!(*picked, "store");
}
