//! Container and factory errors.

use fuzzyioc_analyzer::AnalyzeError;
use thiserror::Error;

/// Failure reported by a type's factory.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("missing argument {index}")]
    MissingArgument { index: usize },
    #[error("argument {index} is not a {expected}")]
    ArgumentType {
        index: usize,
        expected: &'static str,
    },
    #[error("{0}")]
    Custom(String),
}

impl FactoryError {
    pub fn custom(message: impl Into<String>) -> Self {
        FactoryError::Custom(message.into())
    }
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("cannot analyze type '{type_name}': {source}")]
    Analyze {
        type_name: String,
        #[source]
        source: AnalyzeError,
    },
    #[error(
        "no registered type satisfies dependency '{dependency}' of '{type_name}'\n  Methods called: [{}]\n  Members accessed: [{}]",
        .methods.join(", "),
        .members.join(", ")
    )]
    UnsatisfiedDependency {
        type_name: String,
        dependency: String,
        methods: Vec<String>,
        members: Vec<String>,
    },
    #[error("cyclic dependency: {}", .path.join(" -> "))]
    CyclicDependency { path: Vec<String> },
    #[error("dependency chain exceeds {depth} levels")]
    ResolutionTooDeep { depth: u32 },
    #[error("factory for '{type_name}' failed: {source}")]
    ConstructionFailed {
        type_name: String,
        #[source]
        source: FactoryError,
    },
    #[error("instance of '{type_name}' is not a {expected}")]
    InstanceType {
        type_name: String,
        expected: &'static str,
    },
}
