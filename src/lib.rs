//! fuzzyioc: dependency injection by constructor usage.
//!
//! Constructor dependencies are never declared. The container reads the
//! constructor source of the type being resolved, records which members each
//! parameter reads and which methods it calls, and hands in an instance of
//! the first registered type whose own source assigns those names to `this`.
//!
//! The pipeline crates are re-exported here:
//!
//! - [`scanner`] and [`parser`]: JavaScript subset into a `NodeArena`
//! - [`analyzer`]: usage records and shapes
//! - [`container`]: registry, matcher and resolver

// Pipeline crates
pub use fuzzyioc_analyzer as analyzer;
pub use fuzzyioc_common as common;
pub use fuzzyioc_container as container;
pub use fuzzyioc_parser as parser;
pub use fuzzyioc_scanner as scanner;

// Centralized limits and thresholds
pub use fuzzyioc_common::limits;

// Analysis
pub use fuzzyioc_analyzer::{
    AnalyzeError, Shape, Usage, UsageRecord, analyze_usage, analyze_usage_source,
    extract_parameters, extract_parameters_source, shape_of, shape_of_source,
};

// Resolution
pub use fuzzyioc_container::{
    Arguments, Container, ContainerError, FactoryError, Instance, Registry, SatisfierMap, Type,
};

// Parsing
pub use fuzzyioc_parser::{ParseError, SourceTree};

// Tracing configuration (text/tree/json output via FUZZYIOC_LOG_FORMAT)
pub mod tracing_config;
