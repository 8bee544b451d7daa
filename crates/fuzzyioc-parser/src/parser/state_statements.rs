//! Parser state - source file, statement and declaration parsing

use super::base::{NodeIndex, NodeList};
use super::error::ParseError;
use super::node::*;
use super::state::{
    CONTEXT_FLAG_AWAIT, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_YIELD, ParserState,
};
use fuzzyioc_scanner::SyntaxKind;
use tracing::debug;

impl ParserState {
    // =========================================================================
    // Parse Methods - Source file and statements
    // =========================================================================

    /// Parse the whole source text and return the `SOURCE_FILE` node.
    pub fn parse_source_file(&mut self) -> Result<NodeIndex, ParseError> {
        self.next_token()?;
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            statements.push(self.parse_statement()?);
        }
        let end = self.scanner.source().len() as u32;
        let root = self.arena.add_source_file(
            0,
            end,
            SourceFileData {
                file_name: self.file_name.clone(),
                statements: NodeList::with_nodes(statements),
            },
        );
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            "parsed source file"
        );
        Ok(root)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<NodeIndex, ParseError> {
        self.enter_nesting()?;
        let result = self.parse_statement_worker();
        self.leave_nesting();
        result
    }

    fn parse_statement_worker(&mut self) -> Result<NodeIndex, ParseError> {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let pos = self.token_pos();
                self.next_token()?;
                Ok(self
                    .arena
                    .add_token(syntax_kind_ext::EMPTY_STATEMENT, pos, self.prev_token_end))
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::Identifier if self.is_start_of_async_function() => {
                self.parse_function_declaration()
            }
            SyntaxKind::Identifier
                if self.look_ahead(|p| p.scanner.scan() == SyntaxKind::ColonToken) =>
            {
                self.parse_labeled_statement()
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_or_throw(syntax_kind_ext::RETURN_STATEMENT),
            SyntaxKind::ThrowKeyword => self.parse_return_or_throw(syntax_kind_ext::THROW_STATEMENT),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::BreakKeyword => self.parse_jump(syntax_kind_ext::BREAK_STATEMENT),
            SyntaxKind::ContinueKeyword => self.parse_jump(syntax_kind_ext::CONTINUE_STATEMENT),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ClassKeyword | SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword => {
                Err(self.unexpected("statement"))
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse `{ statements }`. Also used for function bodies.
    pub(crate) fn parse_block(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let statements = self.allow_in(|p| {
            let mut statements = Vec::new();
            while !p.is_token(SyntaxKind::CloseBraceToken) {
                if p.is_token(SyntaxKind::EndOfFileToken) {
                    return Err(p.unexpected("}"));
                }
                statements.push(p.parse_statement()?);
            }
            Ok(statements)
        })?;
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(self.arena.add_block(
            syntax_kind_ext::BLOCK,
            pos,
            self.prev_token_end,
            BlockData {
                statements: NodeList::with_nodes(statements),
            },
        ))
    }

    fn parse_expression_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let expression = self.parse_expression()?;
        self.parse_semicolon()?;
        Ok(self.arena.add_wrapped_expr(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            pos,
            self.prev_token_end,
            WrappedExprData { expression },
        ))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_variable_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let list = self.parse_variable_declaration_list()?;
        self.parse_semicolon()?;
        Ok(self.arena.add_wrapped_expr(
            syntax_kind_ext::VARIABLE_STATEMENT,
            pos,
            self.prev_token_end,
            WrappedExprData { expression: list },
        ))
    }

    /// Parse `var|let|const a = 1, b`.
    pub(crate) fn parse_variable_declaration_list(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token()?;

        let mut declarations = Vec::new();
        loop {
            let decl_pos = self.token_pos();
            let name = self.parse_identifier()?;
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken)? {
                self.parse_assignment_expression()?
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.arena.add_variable_declaration(
                syntax_kind_ext::VARIABLE_DECLARATION,
                decl_pos,
                self.prev_token_end,
                VariableDeclarationData { name, initializer },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }

        Ok(self.arena.add_variable_list(
            syntax_kind_ext::VARIABLE_DECLARATION_LIST,
            pos,
            self.prev_token_end,
            flags,
            VariableData {
                declarations: NodeList::with_nodes(declarations),
            },
        ))
    }

    fn parse_function_declaration(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let mut flags = node_flags::NONE;
        if self.is_contextual("async") {
            self.next_token()?;
            flags |= node_flags::ASYNC;
        }
        self.parse_expected(SyntaxKind::FunctionKeyword)?;
        if self.parse_optional(SyntaxKind::AsteriskToken)? {
            flags |= node_flags::GENERATOR;
        }
        let name = self.parse_identifier()?;
        self.parse_function_rest(syntax_kind_ext::FUNCTION_DECLARATION, pos, name, flags)
    }

    /// Context flags for the body of a function with the given `node_flags`.
    pub(crate) fn function_body_context(&self, function_flags: u16) -> u32 {
        let mut context = self.context_flags & !(CONTEXT_FLAG_YIELD | CONTEXT_FLAG_AWAIT);
        if function_flags & node_flags::GENERATOR != 0 {
            context |= CONTEXT_FLAG_YIELD;
        }
        if function_flags & node_flags::ASYNC != 0 {
            context |= CONTEXT_FLAG_AWAIT;
        }
        context
    }

    /// Parse `(parameters) { body }` after the name of a function. `flags`
    /// carries `GENERATOR`/`ASYNC` onto the function node.
    pub(crate) fn parse_function_rest(
        &mut self,
        kind: u16,
        pos: u32,
        name: NodeIndex,
        flags: u16,
    ) -> Result<NodeIndex, ParseError> {
        let context = self.function_body_context(flags);
        let (parameters, body) = self.with_context(context, |p| {
            let parameters = p.parse_parameter_list()?;
            Ok((parameters, p.parse_block()?))
        })?;
        let idx = self.arena.add_function(
            kind,
            pos,
            self.prev_token_end,
            FunctionData {
                name,
                parameters,
                body,
                equals_greater_than_token: false,
            },
        );
        if flags != node_flags::NONE
            && let Some(node) = self.arena.nodes.get_mut(idx.0 as usize)
        {
            node.flags |= flags;
        }
        Ok(idx)
    }

    /// Parse `(a, b = 1, ...rest)`.
    pub(crate) fn parse_parameter_list(&mut self) -> Result<NodeList, ParseError> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let mut parameters = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) {
            parameters.push(self.parse_parameter()?);
            if !self.parse_optional(SyntaxKind::CommaToken)? {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::with_nodes(parameters))
    }

    pub(crate) fn parse_parameter(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken)?;
        let name = self.parse_identifier()?;
        let initializer = if !dot_dot_dot_token && self.parse_optional(SyntaxKind::EqualsToken)? {
            self.allow_in(|p| p.parse_assignment_expression())?
        } else {
            NodeIndex::NONE
        };
        Ok(self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            pos,
            self.prev_token_end,
            ParameterData {
                dot_dot_dot_token,
                name,
                initializer,
            },
        ))
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_parenthesized_condition(&mut self) -> Result<NodeIndex, ParseError> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let expression = self.allow_in(|p| p.parse_expression())?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(expression)
    }

    fn parse_if_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::IfKeyword)?;
        let expression = self.parse_parenthesized_condition()?;
        let then_statement = self.parse_statement()?;
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword)? {
            self.parse_statement()?
        } else {
            NodeIndex::NONE
        };
        Ok(self.arena.add_if_statement(
            syntax_kind_ext::IF_STATEMENT,
            pos,
            self.prev_token_end,
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            },
        ))
    }

    fn parse_do_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::DoKeyword)?;
        let statement = self.parse_statement()?;
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        let condition = self.parse_parenthesized_condition()?;
        self.parse_optional(SyntaxKind::SemicolonToken)?;
        Ok(self.arena.add_loop(
            syntax_kind_ext::DO_STATEMENT,
            pos,
            self.prev_token_end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        ))
    }

    fn parse_while_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::WhileKeyword)?;
        let condition = self.parse_parenthesized_condition()?;
        let statement = self.parse_statement()?;
        Ok(self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            pos,
            self.prev_token_end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        ))
    }

    /// Parse `for (init; cond; step)`, `for (x in y)` and `for (x of y)`.
    fn parse_for_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::ForKeyword)?;
        self.parse_expected(SyntaxKind::OpenParenToken)?;

        let initializer = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            let flags = self.context_flags | CONTEXT_FLAG_DISALLOW_IN;
            self.with_context(flags, |p| {
                if matches!(
                    p.token(),
                    SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword
                ) {
                    p.parse_variable_declaration_list()
                } else {
                    p.parse_expression()
                }
            })?
        };

        let in_or_of = if self.is_token(SyntaxKind::InKeyword) {
            Some(syntax_kind_ext::FOR_IN_STATEMENT)
        } else if self.is_contextual("of") {
            Some(syntax_kind_ext::FOR_OF_STATEMENT)
        } else {
            None
        };

        if let Some(kind) = in_or_of {
            if initializer.is_none() {
                return Err(self.unexpected("for loop variable"));
            }
            self.next_token()?;
            let expression = self.allow_in(|p| {
                if kind == syntax_kind_ext::FOR_OF_STATEMENT {
                    p.parse_assignment_expression()
                } else {
                    p.parse_expression()
                }
            })?;
            self.parse_expected(SyntaxKind::CloseParenToken)?;
            let statement = self.parse_statement()?;
            return Ok(self.arena.add_for_in_of(
                kind,
                pos,
                self.prev_token_end,
                ForInOfData {
                    initializer,
                    expression,
                    statement,
                },
            ));
        }

        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.allow_in(|p| p.parse_expression())?
        };
        self.parse_expected(SyntaxKind::SemicolonToken)?;
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.allow_in(|p| p.parse_expression())?
        };
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        let statement = self.parse_statement()?;

        Ok(self.arena.add_loop(
            syntax_kind_ext::FOR_STATEMENT,
            pos,
            self.prev_token_end,
            LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            },
        ))
    }

    fn parse_return_or_throw(&mut self, kind: u16) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.next_token()?;
        let expression = if kind == syntax_kind_ext::RETURN_STATEMENT && self.can_parse_semicolon()
        {
            NodeIndex::NONE
        } else {
            self.parse_expression()?
        };
        self.parse_semicolon()?;
        Ok(self.arena.add_wrapped_expr(
            kind,
            pos,
            self.prev_token_end,
            WrappedExprData { expression },
        ))
    }

    fn parse_try_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::TryKeyword)?;
        let try_block = self.parse_block()?;

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_pos = self.token_pos();
            self.next_token()?;
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken)? {
                let name = self.parse_identifier()?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                name
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block()?;
            self.arena.add_catch_clause(
                syntax_kind_ext::CATCH_CLAUSE,
                catch_pos,
                self.prev_token_end,
                CatchClauseData {
                    variable_declaration,
                    block,
                },
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword)? {
            self.parse_block()?
        } else {
            NodeIndex::NONE
        };

        if catch_clause.is_none() && finally_block.is_none() {
            return Err(self.unexpected("catch or finally"));
        }

        Ok(self.arena.add_try(
            syntax_kind_ext::TRY_STATEMENT,
            pos,
            self.prev_token_end,
            TryData {
                try_block,
                catch_clause,
                finally_block,
            },
        ))
    }

    /// Parse `switch (expr) { case a: ... default: ... }`.
    fn parse_switch_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::SwitchKeyword)?;
        let expression = self.parse_parenthesized_condition()?;
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let mut clauses = Vec::new();
        let mut seen_default = false;
        while !self.is_token(SyntaxKind::CloseBraceToken) {
            if self.is_token(SyntaxKind::DefaultKeyword) {
                if seen_default {
                    return Err(self.unexpected("case"));
                }
                seen_default = true;
            }
            clauses.push(self.parse_case_clause()?);
        }
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(self.arena.add_switch(
            syntax_kind_ext::SWITCH_STATEMENT,
            pos,
            self.prev_token_end,
            SwitchData {
                expression,
                clauses: NodeList::with_nodes(clauses),
            },
        ))
    }

    fn parse_case_clause(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let (kind, expression) = match self.token() {
            SyntaxKind::CaseKeyword => {
                self.next_token()?;
                let expression = self.allow_in(|p| p.parse_expression())?;
                (syntax_kind_ext::CASE_CLAUSE, expression)
            }
            SyntaxKind::DefaultKeyword => {
                self.next_token()?;
                (syntax_kind_ext::DEFAULT_CLAUSE, NodeIndex::NONE)
            }
            _ => return Err(self.unexpected("case or default")),
        };
        self.parse_expected(SyntaxKind::ColonToken)?;

        let statements = self.allow_in(|p| {
            let mut statements = Vec::new();
            while !matches!(
                p.token(),
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::CloseBraceToken
            ) {
                if p.is_token(SyntaxKind::EndOfFileToken) {
                    return Err(p.unexpected("}"));
                }
                statements.push(p.parse_statement()?);
            }
            Ok(statements)
        })?;

        Ok(self.arena.add_case_clause(
            kind,
            pos,
            self.prev_token_end,
            CaseClauseData {
                expression,
                statements: NodeList::with_nodes(statements),
            },
        ))
    }

    /// Parse `label: statement`.
    fn parse_labeled_statement(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let label = self.parse_identifier()?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let statement = self.parse_statement()?;
        Ok(self.arena.add_labeled(
            syntax_kind_ext::LABELED_STATEMENT,
            pos,
            self.prev_token_end,
            LabeledData { label, statement },
        ))
    }

    fn parse_jump(&mut self, kind: u16) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.next_token()?;
        let label = if self.is_token(SyntaxKind::Identifier) && !self.scanner.has_preceding_line_break()
        {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon()?;
        Ok(self
            .arena
            .add_jump(kind, pos, self.prev_token_end, JumpData { label }))
    }
}
