//! Centralized limits and thresholds.
//!
//! # Categories
//!
//! - **Recursion Depths**: limits that keep recursive algorithms off the end
//!   of the native stack
//! - **Capacity Limits**: pre-allocation sizes

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth accepted by the recursive-descent parser.
///
/// Every nested expression, block or function body adds frames to the parser
/// call stack. Sources nested deeper than this fail with
/// `ParseError::NestingTooDeep` instead of exhausting the stack.
///
/// ```javascript
/// // Each parenthesis, call argument or nested function counts one level:
/// function A(dep) { return ((((((((((dep.x)))))))))); }
/// ```
pub const MAX_PARSE_DEPTH: u32 = 128;

/// Maximum depth of a single dependency resolution chain.
///
/// Cycles are caught exactly by the in-progress stack; this ceiling only
/// bounds acyclic chains through very many distinct registered types.
pub const MAX_RESOLVE_DEPTH: u32 = 128;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum node pre-allocation for a single source file.
pub const MAX_NODE_PREALLOC: usize = 1_000_000;

/// Average source bytes per AST node, used to size the node arena up front.
pub const BYTES_PER_NODE_ESTIMATE: usize = 4;
