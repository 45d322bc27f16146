// Collection parsing module
// Array and object literals, indexing, property access and method calls

use crate::ast::*;
use crate::error::{ParseResult, SyntaxErrorKind};
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    /// `[ expr, ... ]`
    pub(crate) fn parse_array_literal(&mut self) -> ParseResult<Expression> {
        let open = self.advance();
        let mut elements = Vec::new();

        if self.eat(TokenKind::RBracket).is_none() {
            loop {
                elements.push(self.parse_expression()?);
                if self.eat(TokenKind::Comma).is_some() {
                    continue;
                }
                self.expect(
                    TokenKind::RBracket,
                    SyntaxErrorKind::UnexpectedToken,
                    "expected ',' or ']' in array literal",
                )?;
                break;
            }
        }

        Ok(Expression {
            kind: ExpressionKind::ArrayLiteral(elements),
            span: self.span_from(open.span),
        })
    }

    /// `{ key: expr, ... }` with identifier or string keys
    pub(crate) fn parse_object_literal(&mut self) -> ParseResult<Expression> {
        let open = self.advance();
        let mut properties = Vec::new();

        if self.eat(TokenKind::RBrace).is_none() {
            loop {
                let key_token = self.peek().clone();
                let key = if key_token.is(TokenKind::String) {
                    self.advance();
                    key_token.text().unwrap_or_default().to_string()
                } else {
                    self.property_name("expected a property name in object literal")?
                };

                self.expect(
                    TokenKind::Colon,
                    SyntaxErrorKind::UnexpectedToken,
                    "expected ':' after property name",
                )?;
                let value = self.parse_expression()?;
                properties.push(ObjectProperty {
                    key,
                    span: key_token.span.to(&value.span),
                    value,
                });

                if self.eat(TokenKind::Comma).is_some() {
                    continue;
                }
                if self.check(TokenKind::Eof) {
                    return Err(self.error_here(
                        SyntaxErrorKind::UnterminatedBlock,
                        &format!("unterminated object literal opened at line {}", open.line),
                    ));
                }
                self.expect(
                    TokenKind::RBrace,
                    SyntaxErrorKind::UnexpectedToken,
                    "expected ',' or '}' in object literal",
                )?;
                break;
            }
        }

        Ok(Expression {
            kind: ExpressionKind::ObjectLiteral(properties),
            span: self.span_from(open.span),
        })
    }

    /// `ID [ expr ]`
    pub(crate) fn parse_array_access(&mut self, array: Identifier) -> ParseResult<Expression> {
        self.advance();
        let index = self.parse_expression()?;
        self.expect(
            TokenKind::RBracket,
            SyntaxErrorKind::UnexpectedToken,
            "expected ']' after index",
        )?;
        let span = self.span_from(array.span);

        Ok(Expression {
            kind: ExpressionKind::ArrayAccess(ArrayAccess {
                array,
                index: Box::new(index),
                span,
            }),
            span,
        })
    }

    /// `ID . ID` or `ID . ID ( args )`
    pub(crate) fn parse_member(&mut self, object: Identifier) -> ParseResult<Expression> {
        self.advance();
        let member_token = self.peek().clone();
        let name = self.property_name("expected a property name after '.'")?;
        let member = Identifier {
            name,
            span: member_token.span,
        };

        if self.check(TokenKind::LParen) {
            let arguments = self.parse_arguments()?;
            let span = self.span_from(object.span);
            return Ok(Expression {
                kind: ExpressionKind::MethodCall(MethodCall {
                    object,
                    method: member,
                    arguments,
                    span,
                }),
                span,
            });
        }

        let span = self.span_from(object.span);
        Ok(Expression {
            kind: ExpressionKind::PropertyAccess(PropertyAccess {
                object,
                property: member,
                span,
            }),
            span,
        })
    }

    /// Identifier or reserved word used as a property name
    fn property_name(&mut self, message: &str) -> ParseResult<String> {
        let token = self.peek();
        if token.is(TokenKind::Identifier) || token.kind.is_keyword() {
            let name = token.lexeme.clone();
            self.advance();
            return Ok(name);
        }
        Err(self.error_here(SyntaxErrorKind::UnexpectedToken, message))
    }
}
