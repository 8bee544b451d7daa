//! Parser state - expression parsing methods

use super::base::{NodeIndex, NodeList};
use super::error::ParseError;
use super::node::*;
use super::state::{CONTEXT_FLAG_YIELD, ParserState};
use fuzzyioc_scanner::{SyntaxKind, token_is_assignment_operator, token_is_identifier_or_keyword};

impl ParserState {
    // =========================================================================
    // Parse Methods - Expressions
    // =========================================================================

    /// Parse an expression (including comma operator)
    pub(crate) fn parse_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start_pos = self.token_pos();
        let mut left = self.parse_assignment_expression()?;

        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token()?;
            let right = self.parse_assignment_expression()?;
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator_token: SyntaxKind::CommaToken as u16,
                    right,
                },
            );
        }

        Ok(left)
    }

    /// Parse assignment expression
    pub(crate) fn parse_assignment_expression(&mut self) -> Result<NodeIndex, ParseError> {
        self.enter_nesting()?;
        let result = self.parse_assignment_expression_worker();
        self.leave_nesting();
        result
    }

    fn parse_assignment_expression_worker(&mut self) -> Result<NodeIndex, ParseError> {
        if self.in_yield_context() && self.is_contextual("yield") {
            return self.parse_yield_expression();
        }
        if self.is_start_of_arrow_function() {
            return self.parse_arrow_function();
        }

        let start_pos = self.token_pos();
        let left = self.parse_conditional_expression()?;

        if token_is_assignment_operator(self.token()) {
            let operator_token = self.token() as u16;
            self.next_token()?;
            let right = self.parse_assignment_expression()?;
            return Ok(self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator_token,
                    right,
                },
            ));
        }

        Ok(left)
    }

    /// Parse `yield`, `yield expr` or `yield* expr` inside a generator.
    fn parse_yield_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.next_token()?;
        let mut flags = node_flags::NONE;
        let expression = if self.scanner.has_preceding_line_break() {
            NodeIndex::NONE
        } else if self.parse_optional(SyntaxKind::AsteriskToken)? {
            flags = node_flags::DELEGATE;
            self.parse_assignment_expression()?
        } else if matches!(
            self.token(),
            SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::ColonToken
                | SyntaxKind::EndOfFileToken
        ) {
            NodeIndex::NONE
        } else {
            self.parse_assignment_expression()?
        };
        let idx = self.arena.add_wrapped_expr(
            syntax_kind_ext::YIELD_EXPRESSION,
            pos,
            self.prev_token_end,
            WrappedExprData { expression },
        );
        if flags != node_flags::NONE
            && let Some(node) = self.arena.nodes.get_mut(idx.0 as usize)
        {
            node.flags |= flags;
        }
        Ok(idx)
    }

    fn parse_conditional_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start_pos = self.token_pos();
        let condition = self.parse_binary_expression(0)?;
        if !self.is_token(SyntaxKind::QuestionToken) {
            return Ok(condition);
        }
        self.next_token()?;
        let when_true = self.allow_in(|p| p.parse_assignment_expression())?;
        self.parse_expected(SyntaxKind::ColonToken)?;
        let when_false = self.parse_assignment_expression()?;
        Ok(self.arena.add_conditional_expr(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            start_pos,
            self.prev_token_end,
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        ))
    }

    /// Binding power of a binary operator; 0 when the token is not one.
    fn binary_operator_precedence(&self, kind: SyntaxKind) -> u8 {
        match kind {
            SyntaxKind::BarBarToken | SyntaxKind::QuestionQuestionToken => 1,
            SyntaxKind::AmpersandAmpersandToken => 2,
            SyntaxKind::BarToken => 3,
            SyntaxKind::CaretToken => 4,
            SyntaxKind::AmpersandToken => 5,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken => 6,
            SyntaxKind::InKeyword if self.in_disallow_in_context() => 0,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::InstanceOfKeyword
            | SyntaxKind::InKeyword => 7,
            SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 8,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
            SyntaxKind::AsteriskAsteriskToken => 11,
            _ => 0,
        }
    }

    /// Precedence climbing over binary operators binding tighter than `min_precedence`.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> Result<NodeIndex, ParseError> {
        let start_pos = self.token_pos();
        let mut left = self.parse_unary_expression()?;

        loop {
            let operator = self.token();
            let precedence = self.binary_operator_precedence(operator);
            if precedence == 0 || precedence <= min_precedence {
                break;
            }
            self.next_token()?;
            // `**` is right-associative
            let right = if operator == SyntaxKind::AsteriskAsteriskToken {
                self.parse_binary_expression(precedence - 1)?
            } else {
                self.parse_binary_expression(precedence)?
            };
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator_token: operator as u16,
                    right,
                },
            );
        }

        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start_pos = self.token_pos();
        if self.in_await_context() && self.is_contextual("await") {
            self.next_token()?;
            self.enter_nesting()?;
            let operand = self.parse_unary_expression();
            self.leave_nesting();
            let expression = operand?;
            return Ok(self.arena.add_wrapped_expr(
                syntax_kind_ext::AWAIT_EXPRESSION,
                start_pos,
                self.prev_token_end,
                WrappedExprData { expression },
            ));
        }
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                let operator = self.token() as u16;
                self.next_token()?;
                self.enter_nesting()?;
                let operand = self.parse_unary_expression();
                self.leave_nesting();
                let operand = operand?;
                Ok(self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start_pos,
                    self.prev_token_end,
                    UnaryExprData { operator, operand },
                ))
            }
            _ => {
                let expression = self.parse_left_hand_side_expression()?;
                if matches!(
                    self.token(),
                    SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
                ) && !self.scanner.has_preceding_line_break()
                {
                    let operator = self.token() as u16;
                    self.next_token()?;
                    return Ok(self.arena.add_unary_expr(
                        syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                        start_pos,
                        self.prev_token_end,
                        UnaryExprData {
                            operator,
                            operand: expression,
                        },
                    ));
                }
                Ok(expression)
            }
        }
    }

    // =========================================================================
    // Member access, calls and `new`
    // =========================================================================

    fn parse_left_hand_side_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start_pos = self.token_pos();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        self.parse_member_expression_rest(start_pos, expression, true)
    }

    /// Parse `new Callee(args)`; the argument list is optional.
    fn parse_new_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword)?;
        let callee_pos = self.token_pos();
        self.enter_nesting()?;
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.leave_nesting();
        let expression = self.parse_member_expression_rest(callee_pos, callee?, false)?;
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        Ok(self.arena.add_call_expr(
            syntax_kind_ext::NEW_EXPRESSION,
            start_pos,
            self.prev_token_end,
            CallExprData {
                expression,
                arguments,
            },
        ))
    }

    /// Parse the `.name`, `[expr]`, `?.`, tagged template and (when
    /// `allow_calls`) `(args)` suffixes following a primary expression.
    fn parse_member_expression_rest(
        &mut self,
        start_pos: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> Result<NodeIndex, ParseError> {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token()?;
                    let name = self.parse_identifier_name()?;
                    expression = self.add_access(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        start_pos,
                        expression,
                        name,
                        false,
                    );
                }
                SyntaxKind::QuestionDotToken => {
                    self.next_token()?;
                    if self.is_token(SyntaxKind::OpenBracketToken) {
                        let argument = self.parse_element_argument()?;
                        expression = self.add_access(
                            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                            start_pos,
                            expression,
                            argument,
                            true,
                        );
                    } else if self.is_token(SyntaxKind::OpenParenToken) && allow_calls {
                        let arguments = self.parse_arguments()?;
                        expression = self.add_call(start_pos, expression, arguments, true);
                    } else {
                        let name = self.parse_identifier_name()?;
                        expression = self.add_access(
                            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                            start_pos,
                            expression,
                            name,
                            true,
                        );
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    let argument = self.parse_element_argument()?;
                    expression = self.add_access(
                        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                        start_pos,
                        expression,
                        argument,
                        false,
                    );
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_arguments()?;
                    expression = self.add_call(start_pos, expression, arguments, false);
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let template = if self.is_token(SyntaxKind::TemplateHead) {
                        self.parse_template_expression()?
                    } else {
                        self.parse_literal()?
                    };
                    expression = self.arena.add_tagged_template(
                        syntax_kind_ext::TAGGED_TEMPLATE_EXPRESSION,
                        start_pos,
                        self.prev_token_end,
                        TaggedTemplateData {
                            tag: expression,
                            template,
                        },
                    );
                }
                _ => return Ok(expression),
            }
        }
    }

    fn add_access(
        &mut self,
        kind: u16,
        pos: u32,
        expression: NodeIndex,
        name_or_argument: NodeIndex,
        question_dot_token: bool,
    ) -> NodeIndex {
        self.arena.add_access_expr(
            kind,
            pos,
            self.prev_token_end,
            AccessExprData {
                expression,
                name_or_argument,
                question_dot_token,
            },
        )
    }

    fn add_call(
        &mut self,
        pos: u32,
        expression: NodeIndex,
        arguments: NodeList,
        optional: bool,
    ) -> NodeIndex {
        let idx = self.arena.add_call_expr(
            syntax_kind_ext::CALL_EXPRESSION,
            pos,
            self.prev_token_end,
            CallExprData {
                expression,
                arguments: Some(arguments),
            },
        );
        if optional && let Some(node) = self.arena.nodes.get_mut(idx.0 as usize) {
            node.flags |= node_flags::OPTIONAL_CHAIN;
        }
        idx
    }

    /// Parse `[expr]` of an element access.
    fn parse_element_argument(&mut self) -> Result<NodeIndex, ParseError> {
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let argument = self.allow_in(|p| p.parse_expression())?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(argument)
    }

    /// Parse `(a, ...b)`.
    fn parse_arguments(&mut self) -> Result<NodeList, ParseError> {
        self.parse_expected(SyntaxKind::OpenParenToken)?;
        let arguments = self.allow_in(|p| {
            let mut arguments = Vec::new();
            while !p.is_token(SyntaxKind::CloseParenToken) {
                arguments.push(p.parse_spread_or_assignment(syntax_kind_ext::SPREAD_ELEMENT)?);
                if !p.parse_optional(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            Ok(arguments)
        })?;
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        Ok(NodeList::with_nodes(arguments))
    }

    fn parse_spread_or_assignment(&mut self, spread_kind: u16) -> Result<NodeIndex, ParseError> {
        if !self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_assignment_expression();
        }
        let pos = self.token_pos();
        self.next_token()?;
        let expression = self.parse_assignment_expression()?;
        Ok(self.arena.add_wrapped_expr(
            spread_kind,
            pos,
            self.prev_token_end,
            WrappedExprData { expression },
        ))
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier if self.is_start_of_async_function() => {
                self.parse_function_expression()
            }
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::ThisKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => {
                let kind = self.token() as u16;
                self.next_token()?;
                Ok(self.arena.add_token(kind, pos, self.prev_token_end))
            }
            SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::NoSubstitutionTemplateLiteral => self.parse_literal(),
            // `/` in operand position starts a regular expression.
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.current_token = self.scanner.re_scan_slash_token();
                self.check_scan_error()?;
                self.parse_literal()
            }
            SyntaxKind::TemplateHead => self.parse_template_expression(),
            SyntaxKind::OpenParenToken => {
                self.next_token()?;
                let expression = self.allow_in(|p| p.parse_expression())?;
                self.parse_expected(SyntaxKind::CloseParenToken)?;
                Ok(self.arena.add_wrapped_expr(
                    syntax_kind_ext::PARENTHESIZED_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    WrappedExprData { expression },
                ))
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_literal(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let kind = self.token() as u16;
        let text = self.scanner.token_value().to_string();
        self.next_token()?;
        Ok(self
            .arena
            .add_literal(kind, pos, self.prev_token_end, LiteralData { text }))
    }

    /// Parse a template with substitutions: `head ${expr} middle ${expr} tail`.
    fn parse_template_expression(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let mut quasis = vec![self.scanner.token_value().to_string()];
        let mut expressions = Vec::new();
        self.next_token()?;

        loop {
            expressions.push(self.allow_in(|p| p.parse_expression())?);
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                return Err(self.unexpected("}"));
            }
            self.current_token = self.scanner.rescan_template_continuation();
            self.check_scan_error()?;
            quasis.push(self.scanner.token_value().to_string());
            let done = self.is_token(SyntaxKind::TemplateTail);
            self.next_token()?;
            if done {
                break;
            }
        }

        Ok(self.arena.add_template_expr(
            syntax_kind_ext::TEMPLATE_EXPRESSION,
            pos,
            self.prev_token_end,
            TemplateExprData {
                quasis,
                expressions: NodeList::with_nodes(expressions),
            },
        ))
    }

    fn parse_array_literal(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken)?;
        let elements = self.allow_in(|p| {
            let mut elements = Vec::new();
            while !p.is_token(SyntaxKind::CloseBracketToken) {
                if p.is_token(SyntaxKind::CommaToken) {
                    let hole = p.token_pos();
                    p.next_token()?;
                    elements.push(p.arena.add_token(
                        syntax_kind_ext::OMITTED_EXPRESSION,
                        hole,
                        hole,
                    ));
                    continue;
                }
                elements.push(p.parse_spread_or_assignment(syntax_kind_ext::SPREAD_ELEMENT)?);
                if !p.parse_optional(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            Ok(elements)
        })?;
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            pos,
            self.prev_token_end,
            LiteralExprData {
                elements: NodeList::with_nodes(elements),
            },
        ))
    }

    fn parse_object_literal(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken)?;
        let members = self.allow_in(|p| {
            let mut members = Vec::new();
            while !p.is_token(SyntaxKind::CloseBraceToken) {
                members.push(p.parse_object_literal_member()?);
                if !p.parse_optional(SyntaxKind::CommaToken)? {
                    break;
                }
            }
            Ok(members)
        })?;
        self.parse_expected(SyntaxKind::CloseBraceToken)?;
        Ok(self.arena.add_literal_expr(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            pos,
            self.prev_token_end,
            LiteralExprData {
                elements: NodeList::with_nodes(members),
            },
        ))
    }

    fn parse_object_literal_member(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        if self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_spread_or_assignment(syntax_kind_ext::SPREAD_ASSIGNMENT);
        }

        let mut function_flags = node_flags::NONE;
        if self.is_contextual("async")
            && self.look_ahead(|p| {
                let next = p.scanner.scan();
                !p.scanner.has_preceding_line_break()
                    && (token_is_identifier_or_keyword(next)
                        || matches!(
                            next,
                            SyntaxKind::StringLiteral
                                | SyntaxKind::NumericLiteral
                                | SyntaxKind::OpenBracketToken
                                | SyntaxKind::AsteriskToken
                        ))
            })
        {
            self.next_token()?;
            function_flags |= node_flags::ASYNC;
        }
        if self.parse_optional(SyntaxKind::AsteriskToken)? {
            function_flags |= node_flags::GENERATOR;
        }

        // `get name() {}` / `set name(v) {}` are stored like method shorthand.
        let accessor = function_flags == node_flags::NONE
            && (self.is_contextual("get") || self.is_contextual("set"))
            && self.look_ahead(|p| {
                p.scanner.scan();
                let next = p.scanner.token();
                token_is_identifier_or_keyword(next)
                    || matches!(
                        next,
                        SyntaxKind::StringLiteral
                            | SyntaxKind::NumericLiteral
                            | SyntaxKind::OpenBracketToken
                    )
            });
        if accessor {
            self.next_token()?;
        }

        let name_is_identifier = self.is_token(SyntaxKind::Identifier);
        let name = self.parse_property_name()?;

        if accessor
            || function_flags != node_flags::NONE
            || self.is_token(SyntaxKind::OpenParenToken)
        {
            let function_pos = self.token_pos();
            let initializer = self.parse_function_rest(
                syntax_kind_ext::FUNCTION_EXPRESSION,
                function_pos,
                NodeIndex::NONE,
                function_flags,
            )?;
            return Ok(self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                pos,
                self.prev_token_end,
                PropertyAssignmentData { name, initializer },
            ));
        }

        if self.parse_optional(SyntaxKind::ColonToken)? {
            let initializer = self.parse_assignment_expression()?;
            return Ok(self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                pos,
                self.prev_token_end,
                PropertyAssignmentData { name, initializer },
            ));
        }

        if name_is_identifier
            && matches!(
                self.token(),
                SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken
            )
        {
            return Ok(self.arena.add_shorthand_property(
                syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
                pos,
                self.prev_token_end,
                ShorthandPropertyData { name },
            ));
        }

        Err(self.unexpected(":"))
    }

    fn parse_property_name(&mut self) -> Result<NodeIndex, ParseError> {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal(),
            SyntaxKind::OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token()?;
                let expression = self.allow_in(|p| p.parse_assignment_expression())?;
                self.parse_expected(SyntaxKind::CloseBracketToken)?;
                Ok(self.arena.add_wrapped_expr(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    pos,
                    self.prev_token_end,
                    WrappedExprData { expression },
                ))
            }
            _ => self.parse_identifier_name(),
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn parse_function_expression(&mut self) -> Result<NodeIndex, ParseError> {
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
        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()?
        } else {
            NodeIndex::NONE
        };
        self.parse_function_rest(syntax_kind_ext::FUNCTION_EXPRESSION, pos, name, flags)
    }

    /// `async` followed on the same line by an arrow head (`async x =>`,
    /// `async (a) =>`).
    fn is_async_arrow_prefix(&mut self) -> bool {
        self.is_contextual("async")
            && self.look_ahead(|p| {
                let next = p.scanner.scan();
                !p.scanner.has_preceding_line_break()
                    && matches!(next, SyntaxKind::Identifier | SyntaxKind::OpenParenToken)
                    && p.scan_arrow_head(next)
            })
    }

    /// Check if we're at the start of an arrow function: `x =>`, `(...) =>`
    /// or either form after `async`.
    fn is_start_of_arrow_function(&mut self) -> bool {
        if self.is_async_arrow_prefix() {
            return true;
        }
        let current = self.token();
        match current {
            SyntaxKind::Identifier | SyntaxKind::OpenParenToken => {
                self.look_ahead(|p| p.scan_arrow_head(current))
            }
            _ => false,
        }
    }

    /// With the scanner sitting on `first` (an identifier or `(`), scan past
    /// the parameters and report whether `=>` follows on the same line.
    fn scan_arrow_head(&mut self, first: SyntaxKind) -> bool {
        if first == SyntaxKind::OpenParenToken {
            let mut depth = 1u32;
            while depth > 0 {
                match self.scanner.scan() {
                    SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::OpenBraceToken => depth += 1,
                    SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken => depth -= 1,
                    SyntaxKind::EndOfFileToken | SyntaxKind::Unknown => return false,
                    _ => {}
                }
            }
        }
        self.scanner.scan() == SyntaxKind::EqualsGreaterThanToken
            && !self.scanner.has_preceding_line_break()
    }

    fn parse_arrow_function(&mut self) -> Result<NodeIndex, ParseError> {
        let pos = self.token_pos();
        let mut flags = node_flags::NONE;
        if self.is_async_arrow_prefix() {
            self.next_token()?;
            flags |= node_flags::ASYNC;
        }
        let parameters = if self.is_token(SyntaxKind::Identifier) {
            let param_pos = self.token_pos();
            let name = self.parse_identifier()?;
            let param = self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                param_pos,
                self.prev_token_end,
                ParameterData {
                    dot_dot_dot_token: false,
                    name,
                    initializer: NodeIndex::NONE,
                },
            );
            NodeList::with_nodes(vec![param])
        } else {
            self.parse_parameter_list()?
        };
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken)?;

        // Arrows never bind `yield`, so only the async bit reaches the body.
        let context = self.function_body_context(flags) & !CONTEXT_FLAG_YIELD;
        let body = self.with_context(context, |p| {
            if p.is_token(SyntaxKind::OpenBraceToken) {
                p.parse_block()
            } else {
                p.parse_assignment_expression()
            }
        })?;

        let idx = self.arena.add_function(
            syntax_kind_ext::ARROW_FUNCTION,
            pos,
            self.prev_token_end,
            FunctionData {
                name: NodeIndex::NONE,
                parameters,
                body,
                equals_greater_than_token: true,
            },
        );
        if flags != node_flags::NONE
            && let Some(node) = self.arena.nodes.get_mut(idx.0 as usize)
        {
            node.flags |= flags;
        }
        Ok(idx)
    }
}
