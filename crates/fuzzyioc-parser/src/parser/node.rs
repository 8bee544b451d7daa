//! Thin node headers, typed data pools and the `NodeArena`.
//!
//! Every node is a 16-byte `Node` header in `NodeArena::nodes`. Nodes that
//! carry fields store them in a kind-specific pool and point at the entry via
//! `data_index`. Parent links live in the parallel `extended_info` vector.

use super::base::{NodeIndex, NodeList};
use fuzzyioc_common::interner::{Atom, Interner};
use serde::Serialize;

/// Node kinds that have no scanner token counterpart.
///
/// Leaf nodes reuse the token kind (`SyntaxKind::Identifier`,
/// `SyntaxKind::ThisKeyword`, `SyntaxKind::StringLiteral`, ...).
pub mod syntax_kind_ext {
    pub const SOURCE_FILE: u16 = 200;

    // Expressions
    pub const ARRAY_LITERAL_EXPRESSION: u16 = 210;
    pub const OBJECT_LITERAL_EXPRESSION: u16 = 211;
    pub const PROPERTY_ACCESS_EXPRESSION: u16 = 212;
    pub const ELEMENT_ACCESS_EXPRESSION: u16 = 213;
    pub const CALL_EXPRESSION: u16 = 214;
    pub const NEW_EXPRESSION: u16 = 215;
    pub const PARENTHESIZED_EXPRESSION: u16 = 216;
    pub const FUNCTION_EXPRESSION: u16 = 217;
    pub const ARROW_FUNCTION: u16 = 218;
    pub const PREFIX_UNARY_EXPRESSION: u16 = 219;
    pub const POSTFIX_UNARY_EXPRESSION: u16 = 220;
    pub const BINARY_EXPRESSION: u16 = 221;
    pub const CONDITIONAL_EXPRESSION: u16 = 222;
    pub const TEMPLATE_EXPRESSION: u16 = 223;
    pub const SPREAD_ELEMENT: u16 = 224;
    pub const OMITTED_EXPRESSION: u16 = 225;
    pub const TAGGED_TEMPLATE_EXPRESSION: u16 = 226;
    pub const YIELD_EXPRESSION: u16 = 227;
    pub const AWAIT_EXPRESSION: u16 = 228;

    // Object literal members
    pub const PROPERTY_ASSIGNMENT: u16 = 230;
    pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = 231;
    pub const SPREAD_ASSIGNMENT: u16 = 232;
    pub const COMPUTED_PROPERTY_NAME: u16 = 233;

    // Declarations
    pub const PARAMETER: u16 = 240;
    pub const FUNCTION_DECLARATION: u16 = 241;
    pub const VARIABLE_DECLARATION: u16 = 242;
    pub const VARIABLE_DECLARATION_LIST: u16 = 243;

    // Statements
    pub const BLOCK: u16 = 250;
    pub const EMPTY_STATEMENT: u16 = 251;
    pub const VARIABLE_STATEMENT: u16 = 252;
    pub const EXPRESSION_STATEMENT: u16 = 253;
    pub const IF_STATEMENT: u16 = 254;
    pub const DO_STATEMENT: u16 = 255;
    pub const WHILE_STATEMENT: u16 = 256;
    pub const FOR_STATEMENT: u16 = 257;
    pub const FOR_IN_STATEMENT: u16 = 258;
    pub const FOR_OF_STATEMENT: u16 = 259;
    pub const RETURN_STATEMENT: u16 = 260;
    pub const THROW_STATEMENT: u16 = 261;
    pub const TRY_STATEMENT: u16 = 262;
    pub const CATCH_CLAUSE: u16 = 263;
    pub const BREAK_STATEMENT: u16 = 264;
    pub const CONTINUE_STATEMENT: u16 = 265;
    pub const SWITCH_STATEMENT: u16 = 266;
    pub const CASE_CLAUSE: u16 = 267;
    pub const DEFAULT_CLAUSE: u16 = 268;
    pub const LABELED_STATEMENT: u16 = 269;
}

/// Flags packed into `Node::flags`.
pub mod node_flags {
    pub const NONE: u16 = 0;
    pub const LET: u16 = 1;
    pub const CONST: u16 = 2;
    /// Property access or call written with `?.`
    pub const OPTIONAL_CHAIN: u16 = 4;
    /// Function declared with `function*`
    pub const GENERATOR: u16 = 8;
    /// Function or arrow declared with `async`
    pub const ASYNC: u16 = 16;
    /// `yield*`
    pub const DELEGATE: u16 = 32;
}

/// Thin node header.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Node {
    /// SyntaxKind value or a `syntax_kind_ext` constant
    pub kind: u16,
    pub flags: u16,
    /// Start position in source (byte offset)
    pub pos: u32,
    /// End position in source (byte offset)
    pub end: u32,
    /// Index into the type-specific storage pool (u32::MAX = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }
}

/// Per-node information that is not needed on the hot path.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
        }
    }
}

// =============================================================================
// Typed data pools
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub atom: Atom,
}

/// Cooked value of a string, number or no-substitution template literal.
#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16, // SyntaxKind
    pub right: NodeIndex,
}

/// Data for prefix and postfix unary expressions
#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprData {
    pub operator: u16, // SyntaxKind
    pub operand: NodeIndex,
}

/// Data for call/new expressions. `arguments` is `None` for `new F` without
/// an argument list.
#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: Option<NodeList>,
}

/// Data for property/element access
#[derive(Clone, Debug, Serialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot_token: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Data for nodes wrapping exactly one expression: parenthesized
/// expressions, spreads, computed property names, `yield`/`await`,
/// expression/return/throw statements and variable statements (whose
/// expression is the declaration list).
#[derive(Clone, Debug, Serialize)]
pub struct WrappedExprData {
    pub expression: NodeIndex,
}

/// ``tag`text` ``; `template` is a template expression or a
/// no-substitution template literal.
#[derive(Clone, Debug, Serialize)]
pub struct TaggedTemplateData {
    pub tag: NodeIndex,
    pub template: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct TemplateExprData {
    /// Cooked text segments; always `expressions.len() + 1` entries.
    pub quasis: Vec<String>,
    pub expressions: NodeList,
}

/// Data for function declarations/expressions/arrows
#[derive(Clone, Debug, Serialize)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
    pub equals_greater_than_token: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParameterData {
    pub dot_dot_dot_token: bool,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Elements of array literals and members of object literals
#[derive(Clone, Debug, Serialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

/// `name: initializer`. Method shorthand and accessors are stored with a
/// function expression initializer.
#[derive(Clone, Debug, Serialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ShorthandPropertyData {
    pub name: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub file_name: String,
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// Data for `while`, `do`, and classic `for` loops
#[derive(Clone, Debug, Serialize)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForInOfData {
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CatchClauseData {
    pub variable_declaration: NodeIndex,
    pub block: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwitchData {
    pub expression: NodeIndex,
    /// `CASE_CLAUSE` and `DEFAULT_CLAUSE` nodes in source order
    pub clauses: NodeList,
}

/// `case expr: statements` (`expression` is NONE for `default:`)
#[derive(Clone, Debug, Serialize)]
pub struct CaseClauseData {
    pub expression: NodeIndex,
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

/// Data for `break`/`continue` (optional label)
#[derive(Clone, Debug, Serialize)]
pub struct JumpData {
    pub label: NodeIndex,
}

// =============================================================================
// NodeArena
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    /// The thin node headers (16 bytes each)
    pub nodes: Vec<Node>,
    /// Parent links, parallel to `nodes`
    pub extended_info: Vec<ExtendedNodeInfo>,

    pub(crate) interner: Interner,

    // Names and literals
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,

    // Expressions
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub wrapped_exprs: Vec<WrappedExprData>,
    pub template_exprs: Vec<TemplateExprData>,
    pub tagged_templates: Vec<TaggedTemplateData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub property_assignments: Vec<PropertyAssignmentData>,
    pub shorthand_properties: Vec<ShorthandPropertyData>,

    // Functions
    pub functions: Vec<FunctionData>,
    pub parameters: Vec<ParameterData>,

    // Statements
    pub source_files: Vec<SourceFileData>,
    pub blocks: Vec<BlockData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub if_statements: Vec<IfStatementData>,
    pub loops: Vec<LoopData>,
    pub for_in_of: Vec<ForInOfData>,
    pub try_data: Vec<TryData>,
    pub catch_clauses: Vec<CatchClauseData>,
    pub jump_data: Vec<JumpData>,
    pub switch_data: Vec<SwitchData>,
    pub case_clauses: Vec<CaseClauseData>,
    pub labeled_statements: Vec<LabeledData>,
}
