//! Common types and utilities shared by the fuzzyioc crates.
//!
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`)
//! - Centralized limits

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};
#[cfg(test)]
#[path = "tests/interner_tests.rs"]
mod interner_tests;

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;
