//! NodeArena access methods and node kind utilities.

use super::base::NodeIndex;
use super::node::*;
use fuzzyioc_scanner::SyntaxKind;
use smallvec::SmallVec;

/// Children of one node in source order.
pub type ChildList = SmallVec<[NodeIndex; 4]>;

macro_rules! pool_accessor {
    ($(#[$meta:meta])* $name:ident, $pool:ident, $data:ty, [$($kind:expr),+ $(,)?]) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(&self, node: &Node) -> Option<&$data> {
            if node.has_data() && ($(node.kind == $kind)||+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl Node {
    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.kind == SyntaxKind::Identifier as u16
    }

    #[inline]
    pub fn is_this(&self) -> bool {
        self.kind == SyntaxKind::ThisKeyword as u16
    }

    #[inline]
    pub fn is_property_access(&self) -> bool {
        self.kind == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
    }

    #[inline]
    pub fn is_call_or_new(&self) -> bool {
        self.kind == syntax_kind_ext::CALL_EXPRESSION || self.kind == syntax_kind_ext::NEW_EXPRESSION
    }

    /// Function declarations, function expressions and arrow functions.
    #[inline]
    pub fn is_function_like(&self) -> bool {
        matches!(
            self.kind,
            syntax_kind_ext::FUNCTION_DECLARATION
                | syntax_kind_ext::FUNCTION_EXPRESSION
                | syntax_kind_ext::ARROW_FUNCTION
        )
    }

    /// Function expressions and arrow functions (function-valued literals).
    #[inline]
    pub fn is_function_expression_like(&self) -> bool {
        self.kind == syntax_kind_ext::FUNCTION_EXPRESSION
            || self.kind == syntax_kind_ext::ARROW_FUNCTION
    }
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Parent of a node, or `NodeIndex::NONE` for the root.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// Iterate over the ancestors of a node, nearest first.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(Some(self.parent_of(index)), move |&idx| {
            Some(self.parent_of(idx))
        })
        .take_while(|idx| idx.is_some())
    }

    pool_accessor!(
        /// Identifier data for an identifier node.
        get_identifier, identifiers, IdentifierData, [SyntaxKind::Identifier as u16]
    );

    pool_accessor!(
        get_literal, literals, LiteralData,
        [
            SyntaxKind::StringLiteral as u16,
            SyntaxKind::NumericLiteral as u16,
            SyntaxKind::NoSubstitutionTemplateLiteral as u16,
            SyntaxKind::RegularExpressionLiteral as u16,
        ]
    );

    pool_accessor!(
        /// Binary expression data (includes assignments and comma sequences).
        get_binary_expr, binary_exprs, BinaryExprData, [syntax_kind_ext::BINARY_EXPRESSION]
    );

    pool_accessor!(
        get_unary_expr, unary_exprs, UnaryExprData,
        [
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
            syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
        ]
    );

    pool_accessor!(
        /// Call expression data. Also matches `new` expressions.
        get_call_expr, call_exprs, CallExprData,
        [syntax_kind_ext::CALL_EXPRESSION, syntax_kind_ext::NEW_EXPRESSION]
    );

    pool_accessor!(
        /// Property access (`a.b`) or element access (`a[b]`) data.
        get_access_expr, access_exprs, AccessExprData,
        [
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
        ]
    );

    pool_accessor!(
        get_conditional_expr, conditional_exprs, ConditionalExprData,
        [syntax_kind_ext::CONDITIONAL_EXPRESSION]
    );

    pool_accessor!(
        get_wrapped_expr, wrapped_exprs, WrappedExprData,
        [
            syntax_kind_ext::PARENTHESIZED_EXPRESSION,
            syntax_kind_ext::SPREAD_ELEMENT,
            syntax_kind_ext::SPREAD_ASSIGNMENT,
            syntax_kind_ext::COMPUTED_PROPERTY_NAME,
            syntax_kind_ext::YIELD_EXPRESSION,
            syntax_kind_ext::AWAIT_EXPRESSION,
            syntax_kind_ext::EXPRESSION_STATEMENT,
            syntax_kind_ext::RETURN_STATEMENT,
            syntax_kind_ext::THROW_STATEMENT,
            syntax_kind_ext::VARIABLE_STATEMENT,
        ]
    );

    pool_accessor!(
        get_template_expr, template_exprs, TemplateExprData,
        [syntax_kind_ext::TEMPLATE_EXPRESSION]
    );

    pool_accessor!(
        get_tagged_template, tagged_templates, TaggedTemplateData,
        [syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION]
    );

    pool_accessor!(
        get_literal_expr, literal_exprs, LiteralExprData,
        [
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
        ]
    );

    pool_accessor!(
        get_property_assignment, property_assignments, PropertyAssignmentData,
        [syntax_kind_ext::PROPERTY_ASSIGNMENT]
    );

    pool_accessor!(
        get_shorthand_property, shorthand_properties, ShorthandPropertyData,
        [syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT]
    );

    pool_accessor!(
        /// Function data for declarations, expressions and arrows.
        get_function, functions, FunctionData,
        [
            syntax_kind_ext::FUNCTION_DECLARATION,
            syntax_kind_ext::FUNCTION_EXPRESSION,
            syntax_kind_ext::ARROW_FUNCTION,
        ]
    );

    pool_accessor!(
        get_parameter, parameters, ParameterData, [syntax_kind_ext::PARAMETER]
    );

    pool_accessor!(
        get_source_file, source_files, SourceFileData, [syntax_kind_ext::SOURCE_FILE]
    );

    pool_accessor!(get_block, blocks, BlockData, [syntax_kind_ext::BLOCK]);

    pool_accessor!(
        get_variable_list, variables, VariableData,
        [syntax_kind_ext::VARIABLE_DECLARATION_LIST]
    );

    pool_accessor!(
        get_variable_declaration, variable_declarations, VariableDeclarationData,
        [syntax_kind_ext::VARIABLE_DECLARATION]
    );

    pool_accessor!(
        get_if_statement, if_statements, IfStatementData, [syntax_kind_ext::IF_STATEMENT]
    );

    pool_accessor!(
        get_loop, loops, LoopData,
        [
            syntax_kind_ext::WHILE_STATEMENT,
            syntax_kind_ext::DO_STATEMENT,
            syntax_kind_ext::FOR_STATEMENT,
        ]
    );

    pool_accessor!(
        get_for_in_of, for_in_of, ForInOfData,
        [syntax_kind_ext::FOR_IN_STATEMENT, syntax_kind_ext::FOR_OF_STATEMENT]
    );

    pool_accessor!(get_try, try_data, TryData, [syntax_kind_ext::TRY_STATEMENT]);

    pool_accessor!(
        get_catch_clause, catch_clauses, CatchClauseData, [syntax_kind_ext::CATCH_CLAUSE]
    );

    pool_accessor!(
        get_jump, jump_data, JumpData,
        [syntax_kind_ext::BREAK_STATEMENT, syntax_kind_ext::CONTINUE_STATEMENT]
    );

    pool_accessor!(get_switch, switch_data, SwitchData, [syntax_kind_ext::SWITCH_STATEMENT]);

    pool_accessor!(
        /// Case clause data. Also matches `default:` clauses.
        get_case_clause, case_clauses, CaseClauseData,
        [syntax_kind_ext::CASE_CLAUSE, syntax_kind_ext::DEFAULT_CLAUSE]
    );

    pool_accessor!(
        get_labeled, labeled_statements, LabeledData, [syntax_kind_ext::LABELED_STATEMENT]
    );

    /// Text of an identifier node.
    #[inline]
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        let data = self.get_identifier(node)?;
        Some(self.interner.resolve(data.atom))
    }

    /// Text of the parameter names of a function-like node, in declaration order.
    pub fn parameter_names(&self, index: NodeIndex) -> Vec<&str> {
        let Some(func) = self.get(index).and_then(|node| self.get_function(node)) else {
            return Vec::new();
        };
        func.parameters
            .iter()
            .filter_map(|&param| {
                let node = self.get(param)?;
                let data = self.get_parameter(node)?;
                self.identifier_text(data.name)
            })
            .collect()
    }

    /// Children of a node in source order.
    pub fn children(&self, index: NodeIndex) -> ChildList {
        let mut out = ChildList::new();
        let Some(node) = self.get(index) else {
            return out;
        };

        let mut push = |idx: NodeIndex| {
            if idx.is_some() {
                out.push(idx);
            }
        };

        if let Some(data) = self.get_source_file(node) {
            data.statements.iter().copied().for_each(&mut push);
        } else if let Some(data) = self.get_block(node) {
            data.statements.iter().copied().for_each(&mut push);
        } else if let Some(data) = self.get_binary_expr(node) {
            push(data.left);
            push(data.right);
        } else if let Some(data) = self.get_unary_expr(node) {
            push(data.operand);
        } else if let Some(data) = self.get_call_expr(node) {
            push(data.expression);
            if let Some(args) = &data.arguments {
                args.iter().copied().for_each(&mut push);
            }
        } else if let Some(data) = self.get_access_expr(node) {
            push(data.expression);
            push(data.name_or_argument);
        } else if let Some(data) = self.get_conditional_expr(node) {
            push(data.condition);
            push(data.when_true);
            push(data.when_false);
        } else if let Some(data) = self.get_wrapped_expr(node) {
            push(data.expression);
        } else if let Some(data) = self.get_template_expr(node) {
            data.expressions.iter().copied().for_each(&mut push);
        } else if let Some(data) = self.get_tagged_template(node) {
            push(data.tag);
            push(data.template);
        } else if let Some(data) = self.get_literal_expr(node) {
            data.elements.iter().copied().for_each(&mut push);
        } else if let Some(data) = self.get_property_assignment(node) {
            push(data.name);
            push(data.initializer);
        } else if let Some(data) = self.get_shorthand_property(node) {
            push(data.name);
        } else if let Some(data) = self.get_function(node) {
            push(data.name);
            data.parameters.iter().copied().for_each(&mut push);
            push(data.body);
        } else if let Some(data) = self.get_parameter(node) {
            push(data.name);
            push(data.initializer);
        } else if let Some(data) = self.get_variable_list(node) {
            data.declarations.iter().copied().for_each(&mut push);
        } else if let Some(data) = self.get_variable_declaration(node) {
            push(data.name);
            push(data.initializer);
        } else if let Some(data) = self.get_if_statement(node) {
            push(data.expression);
            push(data.then_statement);
            push(data.else_statement);
        } else if let Some(data) = self.get_loop(node) {
            if node.kind == syntax_kind_ext::DO_STATEMENT {
                push(data.statement);
                push(data.condition);
            } else {
                push(data.initializer);
                push(data.condition);
                push(data.incrementor);
                push(data.statement);
            }
        } else if let Some(data) = self.get_for_in_of(node) {
            push(data.initializer);
            push(data.expression);
            push(data.statement);
        } else if let Some(data) = self.get_try(node) {
            push(data.try_block);
            push(data.catch_clause);
            push(data.finally_block);
        } else if let Some(data) = self.get_catch_clause(node) {
            push(data.variable_declaration);
            push(data.block);
        } else if let Some(data) = self.get_jump(node) {
            push(data.label);
        } else if let Some(data) = self.get_switch(node) {
            push(data.expression);
            data.clauses.iter().copied().for_each(&mut push);
        } else if let Some(data) = self.get_case_clause(node) {
            push(data.expression);
            data.statements.iter().copied().for_each(&mut push);
        } else if let Some(data) = self.get_labeled(node) {
            push(data.label);
            push(data.statement);
        }

        out
    }
}
