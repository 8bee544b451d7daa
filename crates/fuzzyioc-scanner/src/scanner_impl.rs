//! Scanner state machine.
//!
//! `ScannerState` turns source text into tokens on demand. The parser pulls
//! one token at a time with [`ScannerState::scan`] and uses
//! [`ScannerState::save_state`] / [`ScannerState::restore_state`] for
//! arbitrary lookahead (arrow function detection).

use crate::char_codes::{
    is_binary_digit, is_identifier_part, is_identifier_start, is_line_break,
    is_octal_digit, is_white_space_single_line,
};
use crate::{SyntaxKind, text_to_keyword};
use std::sync::Arc;
use thiserror::Error;

/// Lexical errors. The scanner returns `SyntaxKind::Unknown` and records the
/// error; the parser turns it into a parse failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("unterminated string literal starting at {pos}")]
    UnterminatedString { pos: u32 },
    #[error("unterminated template literal starting at {pos}")]
    UnterminatedTemplate { pos: u32 },
    #[error("unterminated regular expression starting at {pos}")]
    UnterminatedRegularExpression { pos: u32 },
    #[error("unterminated comment starting at {pos}")]
    UnterminatedComment { pos: u32 },
    #[error("invalid escape sequence at {pos}")]
    InvalidEscape { pos: u32 },
    #[error("invalid character {ch:?} at {pos}")]
    InvalidCharacter { ch: char, pos: u32 },
}

/// Saved scanner position for lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    error: Option<ScanError>,
}

pub struct ScannerState {
    source: Arc<str>,
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    /// Cooked value of the current token (identifier name, string contents)
    token_value: String,
    preceding_line_break: bool,
    error: Option<ScanError>,
}

impl ScannerState {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        ScannerState {
            source: source.into(),
            pos: 0,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            preceding_line_break: false,
            error: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Start of the current token, including leading trivia.
    #[inline]
    pub fn full_start(&self) -> u32 {
        self.full_start as u32
    }

    /// Start of the current token, excluding leading trivia.
    #[inline]
    pub fn token_pos(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> &str {
        &self.source[self.token_start..self.pos]
    }

    /// Whether a line terminator appeared between the previous token and this one.
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    #[inline]
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            error: self.error.clone(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.error = snapshot.error;
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    #[inline]
    fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> u8 {
        self.bytes().get(self.pos + offset).copied().unwrap_or(0)
    }

    fn fail(&mut self, error: ScanError) -> SyntaxKind {
        self.error = Some(error);
        self.token = SyntaxKind::Unknown;
        self.token
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.preceding_line_break = false;
        self.token_value.clear();

        if let Some(kind) = self.skip_trivia() {
            self.token = kind;
            return kind;
        }
        self.token_start = self.pos;

        let Some(ch) = self.peek_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        let kind = match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => {
                self.pos += 1;
                self.scan_template_rest(true)
            }
            '0'..='9' => self.scan_number(),
            '.' if self.byte_at(1).is_ascii_digit() => self.scan_number(),
            c if is_identifier_start(c) || c == '\\' => self.scan_identifier(),
            _ => self.scan_punctuation(ch),
        };
        self.token = kind;
        kind
    }

    /// Skip whitespace and comments. Returns `Some(Unknown)` on an
    /// unterminated block comment.
    fn skip_trivia(&mut self) -> Option<SyntaxKind> {
        loop {
            let Some(ch) = self.peek_char() else {
                return None;
            };
            if is_line_break(ch) {
                self.preceding_line_break = true;
                self.pos += ch.len_utf8();
            } else if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '/' && self.byte_at(1) == b'/' {
                let rest = &self.bytes()[self.pos..];
                match memchr::memchr2(b'\n', b'\r', rest) {
                    Some(offset) => self.pos += offset,
                    None => self.pos = self.source.len(),
                }
            } else if ch == '/' && self.byte_at(1) == b'*' {
                let start = self.pos;
                let body = &self.bytes()[self.pos + 2..];
                match memchr::memmem::find(body, b"*/") {
                    Some(offset) => {
                        if memchr::memchr2(b'\n', b'\r', &body[..offset]).is_some() {
                            self.preceding_line_break = true;
                        }
                        self.pos += 2 + offset + 2;
                    }
                    None => {
                        self.pos = self.source.len();
                        self.token_start = start;
                        return Some(self.fail(ScanError::UnterminatedComment {
                            pos: start as u32,
                        }));
                    }
                }
            } else {
                return None;
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let mut has_escape = false;
        while let Some(ch) = self.peek_char() {
            if is_identifier_part(ch) {
                self.token_value.push(ch);
                self.pos += ch.len_utf8();
            } else if ch == '\\' && self.byte_at(1) == b'u' {
                let escape_pos = self.pos as u32;
                self.pos += 1;
                match self.scan_unicode_escape() {
                    Some(c) if is_identifier_part(c) => {
                        self.token_value.push(c);
                        has_escape = true;
                    }
                    _ => return self.fail(ScanError::InvalidEscape { pos: escape_pos }),
                }
            } else {
                break;
            }
        }
        if self.token_value.is_empty() {
            return self.fail(ScanError::InvalidEscape {
                pos: self.token_start as u32,
            });
        }
        if !has_escape && let Some(keyword) = text_to_keyword(&self.token_value) {
            return keyword;
        }
        SyntaxKind::Identifier
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.byte_at(0) == b'0' && matches!(self.byte_at(1), b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
        {
            let radix_char = self.byte_at(1).to_ascii_lowercase();
            self.pos += 2;
            while let Some(ch) = self.peek_char() {
                let ok = match radix_char {
                    b'x' => ch.is_ascii_hexdigit(),
                    b'o' => is_octal_digit(ch),
                    _ => is_binary_digit(ch),
                };
                if !(ok || ch == '_') {
                    break;
                }
                self.pos += 1;
            }
        } else {
            self.skip_decimal_digits();
            if self.byte_at(0) == b'.' {
                self.pos += 1;
                self.skip_decimal_digits();
            }
            if matches!(self.byte_at(0), b'e' | b'E') {
                let sign = usize::from(matches!(self.byte_at(1), b'+' | b'-'));
                if self.byte_at(1 + sign).is_ascii_digit() {
                    self.pos += 1 + sign;
                    self.skip_decimal_digits();
                }
            }
        }
        if self.byte_at(0) == b'n' {
            self.pos += 1;
        }
        self.token_value = self.source[start..self.pos].replace('_', "");
        SyntaxKind::NumericLiteral
    }

    fn skip_decimal_digits(&mut self) {
        while self.byte_at(0).is_ascii_digit() || self.byte_at(0) == b'_' {
            self.pos += 1;
        }
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos as u32;
        self.pos += 1;
        loop {
            let Some(ch) = self.peek_char() else {
                return self.fail(ScanError::UnterminatedString { pos: start });
            };
            if ch == quote {
                self.pos += 1;
                return SyntaxKind::StringLiteral;
            }
            if is_line_break(ch) {
                return self.fail(ScanError::UnterminatedString { pos: start });
            }
            if ch == '\\' {
                if let Err(error) = self.scan_escape_sequence() {
                    return self.fail(error);
                }
                continue;
            }
            self.token_value.push(ch);
            self.pos += ch.len_utf8();
        }
    }

    /// Scan template characters after an opening backtick (`head == true`) or
    /// after a closing brace of a substitution.
    fn scan_template_rest(&mut self, head: bool) -> SyntaxKind {
        let start = self.token_start as u32;
        loop {
            let Some(ch) = self.peek_char() else {
                return self.fail(ScanError::UnterminatedTemplate { pos: start });
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    return if head {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.byte_at(1) == b'{' => {
                    self.pos += 2;
                    return if head {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => {
                    if let Err(error) = self.scan_escape_sequence() {
                        return self.fail(error);
                    }
                }
                _ => {
                    if is_line_break(ch) {
                        self.preceding_line_break = true;
                    }
                    self.token_value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    /// Re-scan the current `}` token as the continuation of a template
    /// literal. Called by the parser after a `${ expr }` substitution.
    pub fn rescan_template_continuation(&mut self) -> SyntaxKind {
        self.pos = self.token_start + 1;
        self.token_value.clear();
        let kind = self.scan_template_rest(false);
        self.token = kind;
        kind
    }

    /// Re-scan the current `/` or `/=` token as a regular expression literal.
    /// Called by the parser when the slash starts an expression. The token
    /// value is the literal's source text, flags included.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        let start = self.token_start;
        self.pos = start + 1;
        let mut in_class = false;
        loop {
            let Some(ch) = self.peek_char() else {
                return self.fail(ScanError::UnterminatedRegularExpression { pos: start as u32 });
            };
            if is_line_break(ch) {
                return self.fail(ScanError::UnterminatedRegularExpression { pos: start as u32 });
            }
            self.pos += ch.len_utf8();
            match ch {
                '\\' => {
                    // The escaped character never closes the body or a class.
                    match self.peek_char() {
                        Some(next) if !is_line_break(next) => self.pos += next.len_utf8(),
                        _ => {
                            return self.fail(ScanError::UnterminatedRegularExpression {
                                pos: start as u32,
                            });
                        }
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        while let Some(ch) = self.peek_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value.clear();
        self.token_value.push_str(&self.source[start..self.pos]);
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Consume an escape sequence starting at a backslash and push its cooked
    /// value into `token_value`.
    fn scan_escape_sequence(&mut self) -> Result<(), ScanError> {
        let escape_pos = self.pos as u32;
        self.pos += 1;
        let Some(ch) = self.peek_char() else {
            return Err(ScanError::InvalidEscape { pos: escape_pos });
        };
        self.pos += ch.len_utf8();
        let cooked = match ch {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'v' => '\u{000B}',
            '0' if !self.byte_at(0).is_ascii_digit() => '\0',
            'x' => {
                let hex = self
                    .source
                    .get(self.pos..self.pos + 2)
                    .and_then(|h| u32::from_str_radix(h, 16).ok())
                    .and_then(char::from_u32)
                    .ok_or(ScanError::InvalidEscape { pos: escape_pos })?;
                self.pos += 2;
                hex
            }
            'u' => {
                self.pos -= 1;
                self.scan_unicode_escape()
                    .ok_or(ScanError::InvalidEscape { pos: escape_pos })?
            }
            '\r' => {
                if self.byte_at(0) == b'\n' {
                    self.pos += 1;
                }
                return Ok(());
            }
            c if is_line_break(c) => return Ok(()),
            c => c,
        };
        self.token_value.push(cooked);
        Ok(())
    }

    /// Scan `u XXXX` or `u{X...}`; `pos` is at the `u`.
    fn scan_unicode_escape(&mut self) -> Option<char> {
        self.pos += 1;
        if self.byte_at(0) == b'{' {
            let rest = &self.bytes()[self.pos + 1..];
            let close = memchr::memchr(b'}', rest)?;
            let digits = &self.source[self.pos + 1..self.pos + 1 + close];
            let value = u32::from_str_radix(digits, 16).ok()?;
            self.pos += close + 2;
            char::from_u32(value)
        } else {
            let digits = self.source.get(self.pos..self.pos + 4)?;
            let value = u32::from_str_radix(digits, 16).ok()?;
            self.pos += 4;
            char::from_u32(value)
        }
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        let b1 = self.byte_at(1);
        let b2 = self.byte_at(2);
        let b3 = self.byte_at(3);
        let (kind, len) = match ch {
            '{' => (SyntaxKind::OpenBraceToken, 1),
            '}' => (SyntaxKind::CloseBraceToken, 1),
            '(' => (SyntaxKind::OpenParenToken, 1),
            ')' => (SyntaxKind::CloseParenToken, 1),
            '[' => (SyntaxKind::OpenBracketToken, 1),
            ']' => (SyntaxKind::CloseBracketToken, 1),
            ';' => (SyntaxKind::SemicolonToken, 1),
            ',' => (SyntaxKind::CommaToken, 1),
            ':' => (SyntaxKind::ColonToken, 1),
            '~' => (SyntaxKind::TildeToken, 1),
            '.' => match (b1, b2) {
                (b'.', b'.') => (SyntaxKind::DotDotDotToken, 3),
                _ => (SyntaxKind::DotToken, 1),
            },
            '?' => match (b1, b2) {
                (b'?', b'=') => (SyntaxKind::QuestionQuestionEqualsToken, 3),
                (b'?', _) => (SyntaxKind::QuestionQuestionToken, 2),
                (b'.', d) if !d.is_ascii_digit() => (SyntaxKind::QuestionDotToken, 2),
                _ => (SyntaxKind::QuestionToken, 1),
            },
            '=' => match (b1, b2) {
                (b'=', b'=') => (SyntaxKind::EqualsEqualsEqualsToken, 3),
                (b'=', _) => (SyntaxKind::EqualsEqualsToken, 2),
                (b'>', _) => (SyntaxKind::EqualsGreaterThanToken, 2),
                _ => (SyntaxKind::EqualsToken, 1),
            },
            '!' => match (b1, b2) {
                (b'=', b'=') => (SyntaxKind::ExclamationEqualsEqualsToken, 3),
                (b'=', _) => (SyntaxKind::ExclamationEqualsToken, 2),
                _ => (SyntaxKind::ExclamationToken, 1),
            },
            '+' => match b1 {
                b'+' => (SyntaxKind::PlusPlusToken, 2),
                b'=' => (SyntaxKind::PlusEqualsToken, 2),
                _ => (SyntaxKind::PlusToken, 1),
            },
            '-' => match b1 {
                b'-' => (SyntaxKind::MinusMinusToken, 2),
                b'=' => (SyntaxKind::MinusEqualsToken, 2),
                _ => (SyntaxKind::MinusToken, 1),
            },
            '*' => match (b1, b2) {
                (b'*', b'=') => (SyntaxKind::AsteriskAsteriskEqualsToken, 3),
                (b'*', _) => (SyntaxKind::AsteriskAsteriskToken, 2),
                (b'=', _) => (SyntaxKind::AsteriskEqualsToken, 2),
                _ => (SyntaxKind::AsteriskToken, 1),
            },
            '/' => match b1 {
                b'=' => (SyntaxKind::SlashEqualsToken, 2),
                _ => (SyntaxKind::SlashToken, 1),
            },
            '%' => match b1 {
                b'=' => (SyntaxKind::PercentEqualsToken, 2),
                _ => (SyntaxKind::PercentToken, 1),
            },
            '<' => match (b1, b2) {
                (b'<', b'=') => (SyntaxKind::LessThanLessThanEqualsToken, 3),
                (b'<', _) => (SyntaxKind::LessThanLessThanToken, 2),
                (b'=', _) => (SyntaxKind::LessThanEqualsToken, 2),
                _ => (SyntaxKind::LessThanToken, 1),
            },
            '>' => match (b1, b2, b3) {
                (b'>', b'>', b'=') => (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4),
                (b'>', b'>', _) => (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3),
                (b'>', b'=', _) => (SyntaxKind::GreaterThanGreaterThanEqualsToken, 3),
                (b'>', _, _) => (SyntaxKind::GreaterThanGreaterThanToken, 2),
                (b'=', _, _) => (SyntaxKind::GreaterThanEqualsToken, 2),
                _ => (SyntaxKind::GreaterThanToken, 1),
            },
            '&' => match (b1, b2) {
                (b'&', b'=') => (SyntaxKind::AmpersandAmpersandEqualsToken, 3),
                (b'&', _) => (SyntaxKind::AmpersandAmpersandToken, 2),
                (b'=', _) => (SyntaxKind::AmpersandEqualsToken, 2),
                _ => (SyntaxKind::AmpersandToken, 1),
            },
            '|' => match (b1, b2) {
                (b'|', b'=') => (SyntaxKind::BarBarEqualsToken, 3),
                (b'|', _) => (SyntaxKind::BarBarToken, 2),
                (b'=', _) => (SyntaxKind::BarEqualsToken, 2),
                _ => (SyntaxKind::BarToken, 1),
            },
            '^' => match b1 {
                b'=' => (SyntaxKind::CaretEqualsToken, 2),
                _ => (SyntaxKind::CaretToken, 1),
            },
            other => {
                self.pos += other.len_utf8();
                return self.fail(ScanError::InvalidCharacter {
                    ch: other,
                    pos: self.token_start as u32,
                });
            }
        };
        self.pos += len;
        kind
    }
}
