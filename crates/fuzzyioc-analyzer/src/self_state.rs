//! Syntactic helpers shared by usage and shape analysis.

use fuzzyioc_parser::{NodeArena, NodeIndex, syntax_kind_ext};
use fuzzyioc_scanner::SyntaxKind;

/// Name of a self-state access: `this.<name>` or `<Ident>.prototype.<name>`.
pub(crate) fn self_state_name(arena: &NodeArena, idx: NodeIndex) -> Option<&str> {
    let (object, name) = property_access(arena, idx)?;
    let object_node = arena.get(object)?;
    if object_node.is_this() {
        return Some(name);
    }
    let (inner, inner_name) = property_access(arena, object)?;
    if inner_name == "prototype" && arena.get(inner)?.is_identifier() {
        return Some(name);
    }
    None
}

/// Object and name of a non-computed property access.
pub(crate) fn property_access(arena: &NodeArena, idx: NodeIndex) -> Option<(NodeIndex, &str)> {
    let node = arena.get(idx)?;
    if !node.is_property_access() {
        return None;
    }
    let access = arena.get_access_expr(node)?;
    let name = arena.identifier_text(access.name_or_argument)?;
    Some((access.expression, name))
}

/// Whether `idx` is exactly the callee of the call or `new` expression
/// containing it.
pub(crate) fn is_callee(arena: &NodeArena, idx: NodeIndex) -> bool {
    let parent = arena.parent_of(idx);
    arena
        .get(parent)
        .filter(|node| node.is_call_or_new())
        .and_then(|node| arena.get_call_expr(node))
        .is_some_and(|call| call.expression == idx)
}

/// Strip any number of enclosing parentheses.
pub(crate) fn skip_parentheses(arena: &NodeArena, mut idx: NodeIndex) -> NodeIndex {
    while let Some(node) = arena.get(idx)
        && node.kind == syntax_kind_ext::PARENTHESIZED_EXPRESSION
        && let Some(inner) = arena.get_wrapped_expr(node)
    {
        idx = inner.expression;
    }
    idx
}

/// Whether a binary operator (stored as a raw `SyntaxKind`) assigns.
#[inline]
pub(crate) fn is_assignment_operator(operator: u16) -> bool {
    (SyntaxKind::FIRST_ASSIGNMENT as u16..=SyntaxKind::LAST_ASSIGNMENT as u16).contains(&operator)
}
