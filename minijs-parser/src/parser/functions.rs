// Function parsing module
// Declarations, anonymous and arrow functions, parameter and argument lists, calls

use crate::ast::*;
use crate::error::{ParseResult, SyntaxErrorKind};
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    /// `function ID (params) { ... }`
    pub(crate) fn parse_function_declaration(&mut self) -> ParseResult<FunctionDeclaration> {
        let keyword = self.advance();
        let name = self.expect_identifier(
            SyntaxErrorKind::MissingIdentifier,
            "expected a function name after 'function'",
        )?;
        let parameters = self.parse_parameters()?;
        let body = self.parse_block("function")?;

        Ok(FunctionDeclaration {
            name,
            parameters,
            body,
            span: self.span_from(keyword.span),
        })
    }

    /// `function (params) { ... }` in expression position
    pub(crate) fn parse_anonymous_function(&mut self) -> ParseResult<Expression> {
        let keyword = self.advance();
        let parameters = self.parse_parameters()?;
        let body = self.parse_block("function")?;
        let span = self.span_from(keyword.span);

        Ok(Expression {
            kind: ExpressionKind::AnonymousFunction(AnonymousFunction {
                parameters,
                body,
                span,
            }),
            span,
        })
    }

    /// `(params) => expr` or `(params) => { ... }`
    pub(crate) fn parse_arrow_function(&mut self) -> ParseResult<Expression> {
        let start = self.peek().span;
        let parameters = self.parse_parameters()?;
        self.expect(
            TokenKind::Arrow,
            SyntaxErrorKind::UnexpectedToken,
            "expected '=>' after arrow function parameters",
        )?;

        let body = if self.check(TokenKind::LBrace) {
            ArrowBody::Block(self.parse_block("arrow function")?)
        } else {
            ArrowBody::Expression(Box::new(self.parse_expression()?))
        };
        let span = self.span_from(start);

        Ok(Expression {
            kind: ExpressionKind::ArrowFunction(ArrowFunction {
                parameters,
                body,
                span,
            }),
            span,
        })
    }

    /// Lookahead from `(`: `()` or `(ID, ...)` followed by `=>`
    pub(crate) fn is_arrow_function(&self) -> bool {
        let mut offset = 1;
        if self.peek_nth(offset).is(TokenKind::RParen) {
            return self.peek_nth(offset + 1).is(TokenKind::Arrow);
        }

        loop {
            if !self.peek_nth(offset).is(TokenKind::Identifier) {
                return false;
            }
            offset += 1;
            match self.peek_nth(offset).kind {
                TokenKind::Comma => offset += 1,
                TokenKind::RParen => return self.peek_nth(offset + 1).is(TokenKind::Arrow),
                _ => return false,
            }
        }
    }

    /// `( [ID {, ID}] )`
    pub(crate) fn parse_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        self.expect(
            TokenKind::LParen,
            SyntaxErrorKind::MalformedParameters,
            "expected '(' to open parameter list",
        )?;

        let mut parameters = Vec::new();
        if self.eat(TokenKind::RParen).is_some() {
            return Ok(parameters);
        }

        loop {
            parameters.push(
                self.expect_identifier(SyntaxErrorKind::MalformedParameters, "expected a parameter name")?,
            );
            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            self.expect(
                TokenKind::RParen,
                SyntaxErrorKind::MalformedParameters,
                "expected ',' or ')' in parameter list",
            )?;
            return Ok(parameters);
        }
    }

    /// `( [expr {, expr}] )`
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        self.expect(
            TokenKind::LParen,
            SyntaxErrorKind::UnexpectedToken,
            "expected '(' to open argument list",
        )?;

        let mut arguments = Vec::new();
        if self.eat(TokenKind::RParen).is_some() {
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_expression()?);
            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            self.expect(
                TokenKind::RParen,
                SyntaxErrorKind::UnexpectedToken,
                "expected ',' or ')' in argument list",
            )?;
            return Ok(arguments);
        }
    }

    pub(crate) fn parse_function_call(&mut self, callee: Identifier) -> ParseResult<Expression> {
        let arguments = self.parse_arguments()?;
        let span = self.span_from(callee.span);

        Ok(Expression {
            kind: ExpressionKind::FunctionCall(FunctionCall {
                callee,
                arguments,
                span,
            }),
            span,
        })
    }

    /// `console.log(args)`
    pub(crate) fn parse_console_log(&mut self) -> ParseResult<Expression> {
        let console = self.advance();
        self.expect(
            TokenKind::Dot,
            SyntaxErrorKind::UnexpectedToken,
            "expected '.log' after 'console'",
        )?;
        self.expect(
            TokenKind::Log,
            SyntaxErrorKind::UnexpectedToken,
            "expected 'log' after 'console.'",
        )?;
        let arguments = self.parse_arguments()?;

        Ok(Expression {
            kind: ExpressionKind::ConsoleLog(arguments),
            span: self.span_from(console.span),
        })
    }
}
