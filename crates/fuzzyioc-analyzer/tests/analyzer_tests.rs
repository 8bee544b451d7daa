//! Usage and shape analysis over whole constructor sources.

use fuzzyioc_analyzer::{
    AnalyzeError, analyze_usage, analyze_usage_source, extract_parameters, shape_of,
    shape_of_source,
};
use fuzzyioc_parser::SourceTree;
use serde_json::json;

const VIEW: &str = r#"
function View(msgs, logger) {
    this.messages = msgs;
    this.title = msgs.title;
    logger.info("view created");
}

View.prototype.render = function () {
    var text = this.messages.getMessageByKey("some.message.key");
    return text;
};

View.prototype.helper = function (logger) {
    logger.debug("shadowed");
};
"#;

#[test]
fn test_view_usage_record() {
    let record = analyze_usage_source(VIEW).expect("usage");
    assert_eq!(record.parameters().collect::<Vec<_>>(), vec!["msgs", "logger"]);
    assert_eq!(record["msgs"].members, vec!["title"]);
    assert_eq!(record["msgs"].methods, vec!["getMessageByKey"]);
    assert_eq!(record["logger"].methods, vec!["info"]);
    assert!(record["logger"].members.is_empty());
}

#[test]
fn test_view_shape() {
    let shape = shape_of_source(VIEW).expect("shape");
    assert_eq!(
        shape.members.iter().collect::<Vec<_>>(),
        vec!["messages", "title"]
    );
    assert_eq!(
        shape.methods.iter().collect::<Vec<_>>(),
        vec!["render", "helper"]
    );
}

#[test]
fn test_usage_record_serializes_in_parameter_order() {
    let record = analyze_usage_source(VIEW).expect("usage");
    let value = serde_json::to_value(&record).expect("serialize");
    assert_eq!(
        value,
        json!({
            "msgs": { "members": ["title"], "methods": ["getMessageByKey"] },
            "logger": { "members": [], "methods": ["info"] }
        })
    );
    let text = serde_json::to_string(&record).expect("serialize");
    assert!(text.find("\"msgs\"") < text.find("\"logger\""));
}

#[test]
fn test_shape_serializes_as_lists() {
    let shape = shape_of_source("function A() { this.x = 1; this.f = function () {}; }")
        .expect("shape");
    let value = serde_json::to_value(&shape).expect("serialize");
    assert_eq!(value, json!({ "members": ["x"], "methods": ["f"] }));
}

#[test]
fn test_nested_parameters_never_keys() {
    let source = r"
function Service(repo) {
    this.load = function (id, cache) {
        cache.get(id);
        return repo.find(id);
    };
}
";
    let record = analyze_usage_source(source).expect("usage");
    assert_eq!(record.len(), 1);
    assert!(record.get("id").is_none());
    assert!(record.get("cache").is_none());
    assert_eq!(record["repo"].methods, vec!["find"]);
}

#[test]
fn test_same_tree_for_parameters_usage_and_shape() {
    let tree = SourceTree::parse("repo.js", "function Repo(db) { this.all = function () { return db.query(); }; }")
        .expect("parse");
    assert_eq!(extract_parameters(&tree).expect("params"), vec!["db"]);
    assert_eq!(analyze_usage(&tree).expect("usage")["db"].methods, vec!["query"]);
    assert!(shape_of(&tree).has_method("all"));
}

#[test]
fn test_errors_name_the_file() {
    let tree = SourceTree::parse("consts.js", "var answer = 42;").expect("parse");
    let err = analyze_usage(&tree).unwrap_err();
    assert_eq!(
        err,
        AnalyzeError::NoCallableFound {
            file_name: "consts.js".to_string()
        }
    );
    assert!(err.to_string().contains("consts.js"));
}

#[test]
fn test_comments_and_strings_do_not_count() {
    let source = r#"
function A(dep) {
    // dep.commented();
    /* dep.block(); */
    var s = "dep.quoted()";
    dep.real();
}
"#;
    let record = analyze_usage_source(source).expect("usage");
    assert_eq!(record["dep"].methods, vec!["real"]);
}
