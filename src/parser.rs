use crate::ast::{Block, Expr, Ident, InfixOp, PrefixOp, Program, Stmt};
use crate::error::{MonkeyError, Span};
use crate::lexer::{Lexer, Token, TokenType};

/// Binding power of the infix operators, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

fn token_precedence(token_type: &TokenType) -> Precedence {
    match token_type {
        TokenType::EqualEqual | TokenType::BangEqual => Precedence::Equals,
        TokenType::Less | TokenType::Greater => Precedence::LessGreater,
        TokenType::Plus | TokenType::Minus => Precedence::Sum,
        TokenType::Star | TokenType::Slash => Precedence::Product,
        TokenType::LeftParen => Precedence::Call,
        TokenType::LeftBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

fn infix_op(token_type: &TokenType) -> Option<InfixOp> {
    match token_type {
        TokenType::Plus => Some(InfixOp::Add),
        TokenType::Minus => Some(InfixOp::Subtract),
        TokenType::Star => Some(InfixOp::Multiply),
        TokenType::Slash => Some(InfixOp::Divide),
        TokenType::Less => Some(InfixOp::Less),
        TokenType::Greater => Some(InfixOp::Greater),
        TokenType::EqualEqual => Some(InfixOp::Equal),
        TokenType::BangEqual => Some(InfixOp::NotEqual),
        _ => None,
    }
}

/// Operator-precedence parser over a one-token lookahead window.
///
/// Syntax errors are accumulated rather than fatal: a failed statement is
/// dropped and parsing resumes at the next one, so a single pass surfaces
/// every error in the source.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    errors: Vec<MonkeyError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while self.current.token_type != TokenType::Eof {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }

        Program { statements }
    }

    pub fn errors(&self) -> &[MonkeyError] {
        &self.errors
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current.token_type {
            TokenType::Let => self.parse_let_statement(),
            TokenType::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Stmt> {
        let start = self.current.span.start;

        if !self.expect_peek_with_help(
            TokenType::Identifier,
            "Expected identifier after 'let'",
            "A let statement binds a name: let x = 5;",
        ) {
            return None;
        }
        let name = Ident {
            name: self.current.lexeme.clone(),
            span: self.current.span.clone(),
        };

        if !self.expect_peek_with_help(
            TokenType::Equal,
            "Expected '=' after let binding name",
            "A let statement binds a name: let x = 5;",
        ) {
            return None;
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek.token_type == TokenType::Semicolon {
            self.advance();
        }

        Some(Stmt::Let {
            name,
            value,
            span: Span::new(start, self.current.span.end),
        })
    }

    fn parse_return_statement(&mut self) -> Option<Stmt> {
        let start = self.current.span.start;

        // The return value is optional: `return;` and a bare `return` at the
        // end of a block are both legal.
        let value = match self.peek.token_type {
            TokenType::Semicolon => {
                self.advance();
                None
            }
            TokenType::RightBrace | TokenType::Eof => None,
            _ => {
                self.advance();
                let value = self.parse_expression(Precedence::Lowest)?;
                if self.peek.token_type == TokenType::Semicolon {
                    self.advance();
                }
                Some(value)
            }
        };

        Some(Stmt::Return {
            value,
            span: Span::new(start, self.current.span.end),
        })
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let start = self.current.span.start;
        let expr = self.parse_expression(Precedence::Lowest)?;

        // Trailing semicolons are optional.
        if self.peek.token_type == TokenType::Semicolon {
            self.advance();
        }

        Some(Stmt::Expression {
            expr,
            span: Span::new(start, self.current.span.end),
        })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while self.peek.token_type != TokenType::Semicolon
            && precedence < token_precedence(&self.peek.token_type)
        {
            left = match self.peek.token_type {
                TokenType::LeftParen => {
                    self.advance();
                    self.parse_call_expression(left)?
                }
                TokenType::LeftBracket => {
                    self.advance();
                    self.parse_index_expression(left)?
                }
                _ => {
                    self.advance();
                    self.parse_infix_expression(left)?
                }
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.current.token_type {
            TokenType::Identifier => Some(Expr::Identifier(Ident {
                name: self.current.lexeme.clone(),
                span: self.current.span.clone(),
            })),
            TokenType::Integer => self.parse_integer_literal(),
            TokenType::String => Some(Expr::StringLiteral {
                value: self.current.lexeme.clone(),
                span: self.current.span.clone(),
            }),
            TokenType::True => Some(Expr::BooleanLiteral {
                value: true,
                span: self.current.span.clone(),
            }),
            TokenType::False => Some(Expr::BooleanLiteral {
                value: false,
                span: self.current.span.clone(),
            }),
            TokenType::Bang => self.parse_prefix_expression(PrefixOp::Bang),
            TokenType::Minus => self.parse_prefix_expression(PrefixOp::Minus),
            TokenType::LeftParen => self.parse_grouped_expression(),
            TokenType::If => self.parse_if_expression(),
            TokenType::Function => self.parse_function_literal(),
            TokenType::LeftBracket => self.parse_array_literal(),
            TokenType::LeftBrace => self.parse_hash_literal(),
            _ => {
                self.errors.push(MonkeyError::parse_error(
                    self.current.span.clone(),
                    format!(
                        "no prefix parse function for {}",
                        self.current.token_type
                    ),
                ));
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expr> {
        match self.current.lexeme.parse::<i64>() {
            Ok(value) => Some(Expr::IntegerLiteral {
                value,
                span: self.current.span.clone(),
            }),
            Err(_) => {
                self.errors.push(
                    MonkeyError::parse_error(
                        self.current.span.clone(),
                        format!("could not parse '{}' as integer", self.current.lexeme),
                    )
                    .with_help("Integer literals must fit in a signed 64-bit integer."),
                );
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self, operator: PrefixOp) -> Option<Expr> {
        let start = self.current.span.start;
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        let end = right.span().end;
        Some(Expr::Prefix {
            operator,
            right: Box::new(right),
            span: Span::new(start, end),
        })
    }

    fn parse_infix_expression(&mut self, left: Expr) -> Option<Expr> {
        let operator = infix_op(&self.current.token_type)
            .expect("parse_infix_expression called on a non-operator token");
        let precedence = token_precedence(&self.current.token_type);

        self.advance();
        let right = self.parse_expression(precedence)?;

        let span = Span::new(left.span().start, right.span().end);
        Some(Expr::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek_with_help(
            TokenType::RightParen,
            "Expected ')' after expression",
            "Every opening parenthesis '(' must have a matching ')'.",
        ) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expr> {
        let start = self.current.span.start;

        if !self.expect_peek_with_help(
            TokenType::LeftParen,
            "Expected '(' after 'if'",
            "The condition of an if expression is parenthesized: if (x < y) { ... }",
        ) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenType::RightParen, "Expected ')' after if condition") {
            return None;
        }

        if !self.expect_peek(TokenType::LeftBrace, "Expected '{' after if condition") {
            return None;
        }
        let consequence = self.parse_block()?;

        let alternative = if self.peek.token_type == TokenType::Else {
            self.advance();
            if !self.expect_peek(TokenType::LeftBrace, "Expected '{' after 'else'") {
                return None;
            }
            Some(self.parse_block()?)
        } else {
            None
        };

        Some(Expr::If {
            condition: Box::new(condition),
            consequence,
            alternative,
            span: Span::new(start, self.current.span.end),
        })
    }

    fn parse_block(&mut self) -> Option<Block> {
        let start = self.current.span.start;
        let mut statements = Vec::new();

        self.advance();
        while self.current.token_type != TokenType::RightBrace {
            if self.current.token_type == TokenType::Eof {
                self.errors.push(
                    MonkeyError::parse_error(
                        Span::single(self.current.span.start),
                        "Expected '}' after block".to_string(),
                    )
                    .with_help("Blocks opened with '{' must be closed with '}'."),
                );
                return None;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }

        Some(Block {
            statements,
            span: Span::new(start, self.current.span.end),
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expr> {
        let start = self.current.span.start;

        if !self.expect_peek_with_help(
            TokenType::LeftParen,
            "Expected '(' after 'fn'",
            "Function literals look like: fn(x, y) { x + y }",
        ) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LeftBrace, "Expected '{' before function body") {
            return None;
        }
        let body = self.parse_block()?;

        Some(Expr::FunctionLiteral {
            parameters,
            body,
            span: Span::new(start, self.current.span.end),
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Ident>> {
        let mut parameters = Vec::new();

        if self.peek.token_type == TokenType::RightParen {
            self.advance();
            return Some(parameters);
        }

        self.advance();
        parameters.push(self.parse_parameter()?);

        while self.peek.token_type == TokenType::Comma {
            self.advance();
            self.advance();
            parameters.push(self.parse_parameter()?);
        }

        if !self.expect_peek(TokenType::RightParen, "Expected ')' after parameters") {
            return None;
        }

        Some(parameters)
    }

    fn parse_parameter(&mut self) -> Option<Ident> {
        if self.current.token_type != TokenType::Identifier {
            self.errors.push(
                MonkeyError::parse_error(
                    self.current.span.clone(),
                    format!("Expected parameter name, found {}", self.describe_current()),
                )
                .with_help("Function parameters are comma-separated identifiers: fn(x, y) { ... }"),
            );
            return None;
        }
        Some(Ident {
            name: self.current.lexeme.clone(),
            span: self.current.span.clone(),
        })
    }

    fn parse_call_expression(&mut self, function: Expr) -> Option<Expr> {
        let start = function.span().start;
        let arguments = self.parse_expression_list(
            TokenType::RightParen,
            "Expected ')' after arguments",
        )?;
        Some(Expr::Call {
            function: Box::new(function),
            arguments,
            span: Span::new(start, self.current.span.end),
        })
    }

    fn parse_array_literal(&mut self) -> Option<Expr> {
        let start = self.current.span.start;
        let elements = self.parse_expression_list(
            TokenType::RightBracket,
            "Expected ']' after array elements",
        )?;
        Some(Expr::ArrayLiteral {
            elements,
            span: Span::new(start, self.current.span.end),
        })
    }

    /// Comma-separated expressions up to (and including) `end`. The opening
    /// delimiter is the current token.
    fn parse_expression_list(
        &mut self,
        end: TokenType,
        end_message: &str,
    ) -> Option<Vec<Expr>> {
        let mut list = Vec::new();

        if self.peek.token_type == end {
            self.advance();
            return Some(list);
        }

        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.token_type == TokenType::Comma {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end, end_message) {
            return None;
        }

        Some(list)
    }

    fn parse_index_expression(&mut self, left: Expr) -> Option<Expr> {
        let start = left.span().start;

        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RightBracket, "Expected ']' after index expression") {
            return None;
        }

        Some(Expr::Index {
            left: Box::new(left),
            index: Box::new(index),
            span: Span::new(start, self.current.span.end),
        })
    }

    fn parse_hash_literal(&mut self) -> Option<Expr> {
        let start = self.current.span.start;
        let mut pairs = Vec::new();

        while self.peek.token_type != TokenType::RightBrace {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek_with_help(
                TokenType::Colon,
                "Expected ':' after hash key",
                "Hash entries pair a key and a value: {\"key\": \"value\"}",
            ) {
                return None;
            }

            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if self.peek.token_type != TokenType::RightBrace
                && !self.expect_peek(TokenType::Comma, "Expected ',' or '}' in hash literal")
            {
                return None;
            }
        }

        if !self.expect_peek(TokenType::RightBrace, "Expected '}' after hash pairs") {
            return None;
        }

        Some(Expr::HashLiteral {
            pairs,
            span: Span::new(start, self.current.span.end),
        })
    }

    fn expect_peek(&mut self, token_type: TokenType, message: &str) -> bool {
        if self.peek.token_type == token_type {
            self.advance();
            true
        } else {
            self.errors.push(MonkeyError::parse_error(
                self.peek.span.clone(),
                format!("{}, found {}", message, self.describe_peek()),
            ));
            false
        }
    }

    fn expect_peek_with_help(&mut self, token_type: TokenType, message: &str, help: &str) -> bool {
        if self.peek.token_type == token_type {
            self.advance();
            true
        } else {
            self.errors.push(
                MonkeyError::parse_error(
                    self.peek.span.clone(),
                    format!("{}, found {}", message, self.describe_peek()),
                )
                .with_help(help),
            );
            false
        }
    }

    fn describe_peek(&self) -> String {
        describe_token(&self.peek)
    }

    fn describe_current(&self) -> String {
        describe_token(&self.current)
    }

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }
}

fn describe_token(token: &Token) -> String {
    match token.token_type {
        TokenType::Eof => "end of input".to_string(),
        _ => format!("'{}'", token.lexeme),
    }
}
