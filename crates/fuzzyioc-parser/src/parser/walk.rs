//! Depth-first traversal over a `NodeArena`.
//!
//! The traversal is iterative (explicit stack), so walking a tree never
//! recurses deeper than the parser did when building it.

use super::base::NodeIndex;
use super::node::{Node, NodeArena};

/// Every node reachable from `root`, in depth-first pre-order: a node comes
/// before its children, and children come in source order.
pub fn preorder(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    let mut out = Vec::with_capacity(arena.len());
    for_each_preorder(arena, root, |idx, _| out.push(idx));
    out
}

/// Visit every node reachable from `root` in depth-first pre-order.
pub fn for_each_preorder<F>(arena: &NodeArena, root: NodeIndex, mut visit: F)
where
    F: FnMut(NodeIndex, &Node),
{
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        let Some(node) = arena.get(idx) else {
            continue;
        };
        visit(idx, node);
        stack.extend(arena.children(idx).into_iter().rev());
    }
}

/// The first function-like node (declaration, expression or arrow) in
/// pre-order, i.e. the outermost, earliest function in the source.
pub fn first_function_like(arena: &NodeArena, root: NodeIndex) -> Option<NodeIndex> {
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        let node = arena.get(idx)?;
        if node.is_function_like() {
            return Some(idx);
        }
        stack.extend(arena.children(idx).into_iter().rev());
    }
    None
}
