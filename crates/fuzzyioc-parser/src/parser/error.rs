//! Parse errors.

use fuzzyioc_scanner::ScanError;
use thiserror::Error;

/// A syntax error. Parsing stops at the first error; constructor sources are
/// small and a partial tree would make usage analysis silently incomplete.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{file_name}:{pos}: expected {expected}, found {found}")]
    UnexpectedToken {
        file_name: String,
        pos: u32,
        expected: &'static str,
        found: String,
    },
    #[error("{file_name}: {error}")]
    Lexical { file_name: String, error: ScanError },
    #[error("{file_name}:{pos}: nesting exceeds {limit} levels")]
    NestingTooDeep {
        file_name: String,
        pos: u32,
        limit: u32,
    },
}

impl ParseError {
    /// Byte offset the error was reported at.
    pub fn pos(&self) -> u32 {
        match self {
            ParseError::UnexpectedToken { pos, .. } | ParseError::NestingTooDeep { pos, .. } => {
                *pos
            }
            ParseError::Lexical { error, .. } => match error {
                ScanError::UnterminatedString { pos }
                | ScanError::UnterminatedTemplate { pos }
                | ScanError::UnterminatedRegularExpression { pos }
                | ScanError::UnterminatedComment { pos }
                | ScanError::InvalidEscape { pos }
                | ScanError::InvalidCharacter { pos, .. } => *pos,
            },
        }
    }
}
