//! Parser types: node arena, accessors, walker and parser state.

pub mod base;
pub mod error;
pub mod node;
mod node_access;
mod node_arena;
pub mod state;
mod state_expressions;
mod state_statements;
pub mod tree;
pub mod walk;

pub use base::{NodeIndex, NodeList};
pub use node::syntax_kind_ext;
pub use node_access::ChildList;

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod node_tests;
