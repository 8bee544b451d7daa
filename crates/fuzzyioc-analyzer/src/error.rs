use fuzzyioc_parser::ParseError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{file_name}: no function found in source")]
    NoCallableFound { file_name: String },
    /// Two parameters of the constructor share a name, so a usage record
    /// could not tell them apart.
    #[error("{file_name}: duplicate parameter '{name}'")]
    DuplicateParameter { file_name: String, name: String },
}
