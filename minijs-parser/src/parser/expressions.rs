// Expression parsing module
// Precedence climbing from ternary down to primaries

use crate::ast::*;
use crate::error::{ParseResult, SyntaxErrorKind};
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    /// Parse an expression at the lowest precedence level
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.descend()?;
        let expression = self.parse_ternary();
        self.ascend(1);
        expression
    }

    /// `cond ? a : b`, right associative
    fn parse_ternary(&mut self) -> ParseResult<Expression> {
        let condition = self.parse_logical()?;
        if self.eat(TokenKind::Question).is_none() {
            return Ok(condition);
        }

        let then_expr = self.parse_expression()?;
        self.expect(
            TokenKind::Colon,
            SyntaxErrorKind::UnexpectedToken,
            "expected ':' in conditional expression",
        )?;
        let else_expr = self.parse_expression()?;

        let span = condition.span.to(&else_expr.span);
        Ok(Expression {
            kind: ExpressionKind::TernaryOp(TernaryOperation {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                span,
            }),
            span,
        })
    }

    fn parse_logical(&mut self) -> ParseResult<Expression> {
        self.parse_chain(&[TokenKind::And, TokenKind::Or], Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        self.parse_chain(
            &[
                TokenKind::Equals,
                TokenKind::NotEquals,
                TokenKind::Greater,
                TokenKind::Less,
                TokenKind::GreaterEqual,
                TokenKind::LessEqual,
            ],
            Self::parse_additive,
        )
    }

    fn parse_additive(&mut self) -> ParseResult<Expression> {
        self.parse_chain(&[TokenKind::Plus, TokenKind::Minus], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        self.parse_chain(&[TokenKind::Times, TokenKind::Divide], Self::parse_unary)
    }

    /// Left-associative chain of `operand (op operand)*` for one precedence level
    fn parse_chain(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expression>,
    ) -> ParseResult<Expression> {
        let mut left = operand(self)?;
        let mut links = 0;
        while let Some(operator) = self.binary_operator(operators) {
            self.descend()?;
            links += 1;
            let right = operand(self)?;
            left = Self::binary(left, operator, right);
        }
        self.ascend(links);
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let operator = match self.peek().kind {
            TokenKind::Not => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Negate,
            _ => return self.parse_primary(),
        };

        let start = self.advance().span;
        self.descend()?;
        let operand = self.parse_unary();
        self.ascend(1);
        let operand = operand?;
        let span = start.to(&operand.span);
        Ok(Expression {
            kind: ExpressionKind::UnaryOp(UnaryOperation {
                operator,
                operand: Box::new(operand),
                span,
            }),
            span,
        })
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let token = self.peek().clone();
        let kind = match token.kind {
            TokenKind::Number => {
                self.advance();
                ExpressionKind::Number(token.number().unwrap_or_default())
            }
            TokenKind::String => {
                self.advance();
                ExpressionKind::String(token.text().unwrap_or_default().to_string())
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                ExpressionKind::Boolean(token.is(TokenKind::True))
            }
            TokenKind::LParen if self.is_arrow_function() => return self.parse_arrow_function(),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(
                    TokenKind::RParen,
                    SyntaxErrorKind::UnexpectedToken,
                    "expected ')' to close parenthesized expression",
                )?;
                return Ok(inner);
            }
            TokenKind::LBracket => return self.parse_array_literal(),
            TokenKind::LBrace => return self.parse_object_literal(),
            TokenKind::Function => return self.parse_anonymous_function(),
            TokenKind::Console => return self.parse_console_log(),
            TokenKind::Identifier => return self.parse_identifier_expression(),
            _ => {
                return Err(self.error_here(SyntaxErrorKind::UnexpectedToken, "expected an expression"))
            }
        };

        Ok(Expression {
            kind,
            span: token.span,
        })
    }

    /// A name, optionally followed by a call, index or member suffix
    fn parse_identifier_expression(&mut self) -> ParseResult<Expression> {
        let token = self.advance();
        let name = Identifier {
            name: token.lexeme.clone(),
            span: token.span,
        };

        match self.peek().kind {
            TokenKind::LParen => self.parse_function_call(name),
            TokenKind::LBracket => self.parse_array_access(name),
            TokenKind::Dot => self.parse_member(name),
            _ => Ok(Expression {
                kind: ExpressionKind::Identifier(name),
                span: token.span,
            }),
        }
    }

    /// Consume the current token if it is one of `kinds`, as a binary operator
    fn binary_operator(&mut self, kinds: &[TokenKind]) -> Option<BinaryOperator> {
        let kind = self.peek().kind;
        if !kinds.contains(&kind) {
            return None;
        }
        let operator = match kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Subtract,
            TokenKind::Times => BinaryOperator::Multiply,
            TokenKind::Divide => BinaryOperator::Divide,
            TokenKind::Equals => BinaryOperator::Equal,
            TokenKind::NotEquals => BinaryOperator::NotEqual,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
            TokenKind::LessEqual => BinaryOperator::LessEqual,
            TokenKind::And => BinaryOperator::LogicalAnd,
            TokenKind::Or => BinaryOperator::LogicalOr,
            _ => return None,
        };
        self.advance();
        Some(operator)
    }

    fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
        let span = left.span.to(&right.span);
        Expression {
            kind: ExpressionKind::BinaryOp(BinaryOperation {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span,
            }),
            span,
        }
    }
}
