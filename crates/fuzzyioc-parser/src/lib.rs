//! JavaScript parser and AST types for the fuzzyioc source analyzer.
//!
//! The parser builds a flat `NodeArena`: thin 16-byte node headers plus
//! typed data pools, with a parent back-reference for every node. Consumers
//! walk the tree with [`walk::preorder`] and read kind-specific fields through
//! the `get_*` accessors on the arena.

pub mod parser;

pub use parser::base::{NodeIndex, NodeList};
pub use parser::error::ParseError;
pub use parser::node::{Node, NodeArena};
pub use parser::state::ParserState;
pub use parser::syntax_kind_ext;
pub use parser::tree::SourceTree;
pub use parser::walk;
