//! Shapes: the members and methods a type puts on its own instances.

use crate::ANONYMOUS_SOURCE;
use crate::error::AnalyzeError;
use crate::self_state::{is_assignment_operator, self_state_name, skip_parentheses};
use fuzzyioc_parser::{SourceTree, syntax_kind_ext, walk};
use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;

/// Names assigned to self state, in discovery order without repeats.
///
/// `this.render = function () {}` makes `render` a method; any other value
/// (`this.count = 0`) makes a member. A name assigned both ways is in both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub members: IndexSet<String>,
    pub methods: IndexSet<String>,
}

impl Shape {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.methods.is_empty()
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains(name)
    }
}

/// Collect every self-state assignment in `tree`, at any depth.
pub fn shape_of(tree: &SourceTree) -> Shape {
    let arena = tree.arena();
    let mut shape = Shape::default();

    walk::for_each_preorder(arena, tree.root(), |_, node| {
        if node.kind != syntax_kind_ext::BINARY_EXPRESSION {
            return;
        }
        let Some(binary) = arena.get_binary_expr(node) else {
            return;
        };
        if !is_assignment_operator(binary.operator_token) {
            return;
        }
        let Some(name) = self_state_name(arena, binary.left) else {
            return;
        };
        let value = skip_parentheses(arena, binary.right);
        if arena
            .get(value)
            .is_some_and(|n| n.is_function_expression_like())
        {
            shape.methods.insert(name.to_string());
        } else {
            shape.members.insert(name.to_string());
        }
    });

    debug!(
        file = tree.file_name(),
        members = ?shape.members,
        methods = ?shape.methods,
        "computed shape"
    );
    shape
}

/// Parse `source` and compute its shape. Only a syntax error fails.
pub fn shape_of_source(source: &str) -> Result<Shape, AnalyzeError> {
    let tree = SourceTree::parse(ANONYMOUS_SOURCE, source)?;
    Ok(shape_of(&tree))
}

#[cfg(test)]
#[path = "tests/shape_tests.rs"]
mod shape_tests;
