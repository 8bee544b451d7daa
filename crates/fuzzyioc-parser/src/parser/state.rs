//! Parser state: token cursor, error construction and nesting guard.
//!
//! The parser is split across three files:
//! - `state.rs`: the cursor and shared helpers
//! - `state_statements.rs`: source files, statements and declarations
//! - `state_expressions.rs`: expressions

use super::base::NodeIndex;
use super::error::ParseError;
use super::node::{IdentifierData, NodeArena};
use fuzzyioc_common::limits::MAX_PARSE_DEPTH;
use fuzzyioc_scanner::{
    ScannerState, SyntaxKind, token_description, token_is_identifier_or_keyword,
};

/// `in` is not a binary operator here (`for (x in y)` initializers).
pub(crate) const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 0;
/// Inside a generator body: `yield` is an operator.
pub(crate) const CONTEXT_FLAG_YIELD: u32 = 1 << 1;
/// Inside an async body: `await` is an operator.
pub(crate) const CONTEXT_FLAG_AWAIT: u32 = 1 << 2;

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    /// End of the most recently consumed token
    pub(crate) prev_token_end: u32,
    pub(crate) context_flags: u32,
    depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let arena = NodeArena::for_source_len(source_text.len());
        ParserState {
            scanner: ScannerState::new(source_text),
            arena,
            file_name,
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            context_flags: 0,
            depth: 0,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    /// Whether the current token is the identifier `text` (contextual keywords
    /// such as `of`, `get`, `set`).
    #[inline]
    pub(crate) fn is_contextual(&self, text: &str) -> bool {
        self.current_token == SyntaxKind::Identifier && self.scanner.token_value() == text
    }

    /// Advance to the next token.
    pub(crate) fn next_token(&mut self) -> Result<SyntaxKind, ParseError> {
        self.prev_token_end = self.scanner.token_end();
        self.current_token = self.scanner.scan();
        self.check_scan_error()?;
        Ok(self.current_token)
    }

    pub(crate) fn check_scan_error(&self) -> Result<(), ParseError> {
        if self.current_token == SyntaxKind::Unknown
            && let Some(error) = self.scanner.error()
        {
            return Err(ParseError::Lexical {
                file_name: self.file_name.clone(),
                error: error.clone(),
            });
        }
        Ok(())
    }

    /// Consume `kind` or fail.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> Result<(), ParseError> {
        if self.is_token(kind) {
            self.next_token()?;
            Ok(())
        } else {
            Err(self.unexpected(token_description(kind)))
        }
    }

    /// Consume `kind` if present.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> Result<bool, ParseError> {
        if self.is_token(kind) {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Whether a statement may end here without an explicit `;`.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.current_token,
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.scanner.has_preceding_line_break()
    }

    /// Consume a statement terminator, applying automatic semicolon insertion.
    pub(crate) fn parse_semicolon(&mut self) -> Result<(), ParseError> {
        if self.is_token(SyntaxKind::SemicolonToken) {
            self.next_token()?;
            return Ok(());
        }
        if self.can_parse_semicolon() {
            return Ok(());
        }
        Err(self.unexpected(";"))
    }

    pub(crate) fn unexpected(&self, expected: &'static str) -> ParseError {
        let found = match self.current_token {
            SyntaxKind::Identifier => format!("identifier '{}'", self.scanner.token_value()),
            SyntaxKind::EndOfFileToken => "end of input".to_string(),
            kind => format!("'{}'", token_description(kind)),
        };
        ParseError::UnexpectedToken {
            file_name: self.file_name.clone(),
            pos: self.token_pos(),
            expected,
            found,
        }
    }

    // =========================================================================
    // Nesting guard and context
    // =========================================================================

    pub(crate) fn enter_nesting(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            return Err(ParseError::NestingTooDeep {
                file_name: self.file_name.clone(),
                pos: self.token_pos(),
                limit: MAX_PARSE_DEPTH,
            });
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn leave_nesting(&mut self) {
        self.depth -= 1;
    }

    #[inline]
    pub(crate) fn in_disallow_in_context(&self) -> bool {
        self.context_flags & CONTEXT_FLAG_DISALLOW_IN != 0
    }

    #[inline]
    pub(crate) fn in_yield_context(&self) -> bool {
        self.context_flags & CONTEXT_FLAG_YIELD != 0
    }

    #[inline]
    pub(crate) fn in_await_context(&self) -> bool {
        self.context_flags & CONTEXT_FLAG_AWAIT != 0
    }

    /// Run `f` with the given context flags, restoring the previous flags after.
    pub(crate) fn with_context<T>(
        &mut self,
        flags: u32,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = self.context_flags;
        self.context_flags = flags;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    /// Run `f` with `in` allowed as an operator (inside brackets and bodies).
    #[inline]
    pub(crate) fn allow_in<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let flags = self.context_flags & !CONTEXT_FLAG_DISALLOW_IN;
        self.with_context(flags, f)
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    fn add_identifier_from_token(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let atom = self.arena.interner.intern(self.scanner.token_value());
        self.next_token()?;
        let end = self.prev_token_end;
        Ok(self
            .arena
            .add_identifier(SyntaxKind::Identifier as u16, pos, end, atom))
    }

    /// Parse an identifier reference or binding name. Reserved words fail.
    pub(crate) fn parse_identifier(&mut self) -> Result<NodeIndex, ParseError> {
        if !self.is_token(SyntaxKind::Identifier) {
            return Err(self.unexpected("identifier"));
        }
        self.add_identifier_from_token()
    }

    /// Parse a property name after `.` or in an object literal. Reserved words
    /// are allowed (`this.delete`, `{ new: 1 }`).
    pub(crate) fn parse_identifier_name(&mut self) -> Result<NodeIndex, ParseError> {
        if !token_is_identifier_or_keyword(self.current_token) {
            return Err(self.unexpected("property name"));
        }
        // Keywords keep their spelling in the token value as well.
        self.add_identifier_from_token()
    }

    /// `async function` with no line break between the two words.
    pub(crate) fn is_start_of_async_function(&mut self) -> bool {
        self.is_contextual("async")
            && self.look_ahead(|p| {
                p.scanner.scan() == SyntaxKind::FunctionKeyword
                    && !p.scanner.has_preceding_line_break()
            })
    }

    /// Look ahead with `f`, always restoring the cursor afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        result
    }
}

impl IdentifierData {
    /// Resolve the identifier's text through the arena's interner.
    pub fn text<'a>(&self, arena: &'a NodeArena) -> &'a str {
        arena.interner.resolve(self.atom)
    }
}
