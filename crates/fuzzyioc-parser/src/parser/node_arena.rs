//! NodeArena creation methods (add_* methods).
//!
//! Nodes are built bottom-up: children exist before their parent, and each
//! add_* method links the children it receives to the new node.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use fuzzyioc_common::interner::{Atom, Interner};
use fuzzyioc_common::limits::{BYTES_PER_NODE_ESTIMATE, MAX_NODE_PREALLOC};

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized for a source of `source_len` bytes.
    pub fn for_source_len(source_len: usize) -> NodeArena {
        let capacity = (source_len / BYTES_PER_NODE_ESTIMATE).min(MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(capacity);
        arena.extended_info = Vec::with_capacity(capacity);
        arena.identifiers = Vec::with_capacity(capacity / 4);
        arena.access_exprs = Vec::with_capacity(capacity / 8);
        arena.call_exprs = Vec::with_capacity(capacity / 8);
        arena.interner.intern_common();
        arena
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_some()
            && let Some(info) = self.extended_info.get_mut(child.0 as usize)
        {
            info.parent = parent;
        }
    }

    #[inline]
    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    #[inline]
    fn set_parent_opt_list(&mut self, list: &Option<NodeList>, parent: NodeIndex) {
        if let Some(l) = list {
            self.set_parent_list(l, parent);
        }
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        index
    }

    /// Add a node with no data (`this`, `true`, `null`, empty statements).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    pub fn add_identifier(&mut self, kind: u16, pos: u32, end: u32, atom: Atom) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData { atom });
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_binary_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: BinaryExprData,
    ) -> NodeIndex {
        let (left, right) = (data.left, data.right);
        let data_index = self.binary_exprs.len() as u32;
        self.binary_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(left, index);
        self.set_parent(right, index);
        index
    }

    pub fn add_unary_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: UnaryExprData,
    ) -> NodeIndex {
        let operand = data.operand;
        let data_index = self.unary_exprs.len() as u32;
        self.unary_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(operand, index);
        index
    }

    pub fn add_call_expr(&mut self, kind: u16, pos: u32, end: u32, data: CallExprData) -> NodeIndex {
        let expression = data.expression;
        let arguments = data.arguments.clone();
        let data_index = self.call_exprs.len() as u32;
        self.call_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(expression, index);
        self.set_parent_opt_list(&arguments, index);
        index
    }

    pub fn add_access_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: AccessExprData,
    ) -> NodeIndex {
        let (expression, name) = (data.expression, data.name_or_argument);
        let optional = data.question_dot_token;
        let data_index = self.access_exprs.len() as u32;
        self.access_exprs.push(data);
        let mut node = Node::with_data(kind, pos, end, data_index);
        if optional {
            node.flags |= node_flags::OPTIONAL_CHAIN;
        }
        let index = self.push_node(node);
        self.set_parent(expression, index);
        self.set_parent(name, index);
        index
    }

    pub fn add_conditional_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ConditionalExprData,
    ) -> NodeIndex {
        let children = [data.condition, data.when_true, data.when_false];
        let data_index = self.conditional_exprs.len() as u32;
        self.conditional_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_wrapped_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: WrappedExprData,
    ) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.wrapped_exprs.len() as u32;
        self.wrapped_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(expression, index);
        index
    }

    pub fn add_template_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: TemplateExprData,
    ) -> NodeIndex {
        let expressions = data.expressions.clone();
        let data_index = self.template_exprs.len() as u32;
        self.template_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent_list(&expressions, index);
        index
    }

    pub fn add_tagged_template(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: TaggedTemplateData,
    ) -> NodeIndex {
        let (tag, template) = (data.tag, data.template);
        let data_index = self.tagged_templates.len() as u32;
        self.tagged_templates.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(tag, index);
        self.set_parent(template, index);
        index
    }

    pub fn add_literal_expr(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: LiteralExprData,
    ) -> NodeIndex {
        let elements = data.elements.clone();
        let data_index = self.literal_exprs.len() as u32;
        self.literal_exprs.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent_list(&elements, index);
        index
    }

    pub fn add_property_assignment(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: PropertyAssignmentData,
    ) -> NodeIndex {
        let (name, initializer) = (data.name, data.initializer);
        let data_index = self.property_assignments.len() as u32;
        self.property_assignments.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(name, index);
        self.set_parent(initializer, index);
        index
    }

    pub fn add_shorthand_property(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ShorthandPropertyData,
    ) -> NodeIndex {
        let name = data.name;
        let data_index = self.shorthand_properties.len() as u32;
        self.shorthand_properties.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(name, index);
        index
    }

    pub fn add_function(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: FunctionData,
    ) -> NodeIndex {
        let (name, body) = (data.name, data.body);
        let parameters = data.parameters.clone();
        let data_index = self.functions.len() as u32;
        self.functions.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(name, index);
        self.set_parent_list(&parameters, index);
        self.set_parent(body, index);
        index
    }

    pub fn add_parameter(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: ParameterData,
    ) -> NodeIndex {
        let (name, initializer) = (data.name, data.initializer);
        let data_index = self.parameters.len() as u32;
        self.parameters.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(name, index);
        self.set_parent(initializer, index);
        index
    }

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let statements = data.statements.clone();
        let data_index = self.source_files.len() as u32;
        self.source_files.push(data);
        let index = self.push_node(Node::with_data(
            syntax_kind_ext::SOURCE_FILE,
            pos,
            end,
            data_index,
        ));
        self.set_parent_list(&statements, index);
        index
    }

    pub fn add_block(&mut self, kind: u16, pos: u32, end: u32, data: BlockData) -> NodeIndex {
        let statements = data.statements.clone();
        let data_index = self.blocks.len() as u32;
        self.blocks.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent_list(&statements, index);
        index
    }

    pub fn add_variable_list(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        flags: u16,
        data: VariableData,
    ) -> NodeIndex {
        let declarations = data.declarations.clone();
        let data_index = self.variables.len() as u32;
        self.variables.push(data);
        let mut node = Node::with_data(kind, pos, end, data_index);
        node.flags = flags;
        let index = self.push_node(node);
        self.set_parent_list(&declarations, index);
        index
    }

    pub fn add_variable_declaration(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: VariableDeclarationData,
    ) -> NodeIndex {
        let (name, initializer) = (data.name, data.initializer);
        let data_index = self.variable_declarations.len() as u32;
        self.variable_declarations.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(name, index);
        self.set_parent(initializer, index);
        index
    }

    pub fn add_if_statement(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: IfStatementData,
    ) -> NodeIndex {
        let children = [data.expression, data.then_statement, data.else_statement];
        let data_index = self.if_statements.len() as u32;
        self.if_statements.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_loop(&mut self, kind: u16, pos: u32, end: u32, data: LoopData) -> NodeIndex {
        let children = [
            data.initializer,
            data.condition,
            data.incrementor,
            data.statement,
        ];
        let data_index = self.loops.len() as u32;
        self.loops.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_for_in_of(&mut self, kind: u16, pos: u32, end: u32, data: ForInOfData) -> NodeIndex {
        let children = [data.initializer, data.expression, data.statement];
        let data_index = self.for_in_of.len() as u32;
        self.for_in_of.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_try(&mut self, kind: u16, pos: u32, end: u32, data: TryData) -> NodeIndex {
        let children = [data.try_block, data.catch_clause, data.finally_block];
        let data_index = self.try_data.len() as u32;
        self.try_data.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_catch_clause(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: CatchClauseData,
    ) -> NodeIndex {
        let (variable, block) = (data.variable_declaration, data.block);
        let data_index = self.catch_clauses.len() as u32;
        self.catch_clauses.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(variable, index);
        self.set_parent(block, index);
        index
    }

    pub fn add_jump(&mut self, kind: u16, pos: u32, end: u32, data: JumpData) -> NodeIndex {
        let label = data.label;
        let data_index = self.jump_data.len() as u32;
        self.jump_data.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(label, index);
        index
    }

    pub fn add_switch(&mut self, kind: u16, pos: u32, end: u32, data: SwitchData) -> NodeIndex {
        let expression = data.expression;
        let clauses = data.clauses.clone();
        let data_index = self.switch_data.len() as u32;
        self.switch_data.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(expression, index);
        self.set_parent_list(&clauses, index);
        index
    }

    pub fn add_case_clause(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        data: CaseClauseData,
    ) -> NodeIndex {
        let expression = data.expression;
        let statements = data.statements.clone();
        let data_index = self.case_clauses.len() as u32;
        self.case_clauses.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(expression, index);
        self.set_parent_list(&statements, index);
        index
    }

    pub fn add_labeled(&mut self, kind: u16, pos: u32, end: u32, data: LabeledData) -> NodeIndex {
        let (label, statement) = (data.label, data.statement);
        let data_index = self.labeled_statements.len() as u32;
        self.labeled_statements.push(data);
        let index = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(label, index);
        self.set_parent(statement, index);
        index
    }
}
