//! A parsed source unit.

use super::base::NodeIndex;
use super::error::ParseError;
use super::node::NodeArena;
use super::state::ParserState;
use fuzzyioc_common::Span;
use std::fmt;

/// The arena and root node of one parsed source text.
#[derive(Clone)]
pub struct SourceTree {
    file_name: String,
    source: String,
    arena: NodeArena,
    root: NodeIndex,
}

impl SourceTree {
    /// Parse `source`, naming it `file_name` in error messages.
    pub fn parse(file_name: impl Into<String>, source: impl Into<String>) -> Result<Self, ParseError> {
        let file_name = file_name.into();
        let source = source.into();
        let mut parser = ParserState::new(file_name.clone(), source.clone());
        let root = parser.parse_source_file()?;
        Ok(SourceTree {
            file_name,
            source,
            arena: parser.into_arena(),
            root,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Byte range of a node.
    pub fn span_of(&self, index: NodeIndex) -> Option<Span> {
        let node = self.arena.get(index)?;
        Some(Span::new(node.pos, node.end))
    }

    /// Source text covered by a node.
    pub fn text_of(&self, index: NodeIndex) -> Option<&str> {
        self.span_of(index)?.slice(&self.source)
    }
}

impl fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceTree")
            .field("file_name", &self.file_name)
            .field("nodes", &self.arena.len())
            .field("root", &self.root)
            .finish()
    }
}
