//! Static analysis of constructor sources.
//!
//! Two questions are answered here, both by walking the parsed tree of a
//! type's source text:
//!
//! - [`analyze_usage`]: for each parameter of the first function in the
//!   source, which members are read and which methods are called on it.
//! - [`shape_of`]: which members and methods the type puts on its own
//!   instances (`this.x = ...` and `Type.prototype.x = ...`).
//!
//! The container matches the first against the second.

pub mod error;
mod self_state;
pub mod shape;
pub mod usage;

pub use error::AnalyzeError;
pub use shape::{Shape, shape_of, shape_of_source};
pub use usage::{
    AliasTable, Usage, UsageRecord, alias_table, analyze_usage, analyze_usage_source,
    extract_parameters, extract_parameters_source,
};

/// File name used in diagnostics for sources analyzed without a name.
pub const ANONYMOUS_SOURCE: &str = "<source>";
