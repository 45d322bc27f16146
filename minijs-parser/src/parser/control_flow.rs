// Control flow parsing module
// Handles if/else chains, loops, switch and try/catch statements

use crate::ast::*;
use crate::error::{ParseResult, SyntaxErrorKind};
use crate::parser::Parser;
use crate::token::TokenKind;

impl Parser<'_> {
    /// `if (cond) { ... } [else { ... } | else if ...]`
    pub(crate) fn parse_if_statement(&mut self) -> ParseResult<IfStatement> {
        let keyword = self.advance();
        let condition = self.parse_condition("if")?;
        let then_block = self.parse_block("if")?;

        let else_block = match self.eat(TokenKind::Else) {
            Some(_) if self.check(TokenKind::If) => {
                let start = self.peek().span;
                let nested = self.parse_if_statement()?;
                let span = self.span_from(start);
                Some(Block {
                    statements: vec![Statement {
                        kind: StatementKind::If(nested),
                        span,
                    }],
                    span,
                })
            }
            Some(_) => Some(self.parse_block("else")?),
            None => None,
        };

        Ok(IfStatement {
            condition,
            then_block,
            else_block,
            span: self.span_from(keyword.span),
        })
    }

    pub(crate) fn parse_while_statement(&mut self) -> ParseResult<WhileStatement> {
        let keyword = self.advance();
        let condition = self.parse_condition("while")?;
        let body = self.parse_block("while")?;

        Ok(WhileStatement {
            condition,
            body,
            span: self.span_from(keyword.span),
        })
    }

    /// `for (init; cond; update) { ... }`, each header part optional
    pub(crate) fn parse_for_statement(&mut self) -> ParseResult<ForStatement> {
        let keyword = self.advance();
        self.expect(
            TokenKind::LParen,
            SyntaxErrorKind::MalformedForHeader,
            "expected '(' after 'for'",
        )?;

        let init = match self.peek().kind {
            TokenKind::Semicolon => None,
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let start = self.peek().span;
                let declaration = self.parse_declaration()?;
                Some(Box::new(Statement {
                    kind: StatementKind::Declaration(declaration),
                    span: self.span_from(start),
                }))
            }
            TokenKind::Identifier if self.peek_nth(1).is(TokenKind::Assign) => {
                let assignment = self.parse_assignment()?;
                Some(Box::new(Statement {
                    span: assignment.span,
                    kind: StatementKind::Assignment(assignment),
                }))
            }
            _ => {
                return Err(self.error_here(
                    SyntaxErrorKind::MalformedForHeader,
                    "for initializer must be a declaration or an assignment",
                ))
            }
        };
        self.expect(
            TokenKind::Semicolon,
            SyntaxErrorKind::MalformedForHeader,
            "expected ';' after for initializer",
        )?;

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(
            TokenKind::Semicolon,
            SyntaxErrorKind::MalformedForHeader,
            "expected ';' after for condition",
        )?;

        let update = match self.peek().kind {
            TokenKind::RParen => None,
            TokenKind::Identifier if self.peek_nth(1).is(TokenKind::Assign) => {
                let assignment = self.parse_assignment()?;
                Some(Box::new(Statement {
                    span: assignment.span,
                    kind: StatementKind::Assignment(assignment),
                }))
            }
            _ => {
                let expression = self.parse_expression()?;
                Some(Box::new(Statement {
                    span: expression.span,
                    kind: StatementKind::Expression(expression),
                }))
            }
        };
        self.expect(
            TokenKind::RParen,
            SyntaxErrorKind::MalformedForHeader,
            "expected ')' to close for header",
        )?;

        let body = self.parse_block("for")?;
        Ok(ForStatement {
            init,
            condition,
            update,
            body,
            span: self.span_from(keyword.span),
        })
    }

    /// `switch (expr) { case expr: ... default: ... }`
    pub(crate) fn parse_switch_statement(&mut self) -> ParseResult<SwitchStatement> {
        let keyword = self.advance();
        let discriminant = self.parse_condition("switch")?;
        let open = self.expect(
            TokenKind::LBrace,
            SyntaxErrorKind::UnexpectedToken,
            "expected '{' to open switch body",
        )?;

        let clause_end = [TokenKind::Case, TokenKind::Default, TokenKind::RBrace];
        let mut cases = Vec::new();
        let mut default = None;

        loop {
            match self.peek().kind {
                TokenKind::Case => {
                    let case = self.advance();
                    if self.check(TokenKind::Colon) {
                        return Err(self.error_here(
                            SyntaxErrorKind::MalformedCase,
                            "missing expression after 'case'",
                        ));
                    }
                    let test = self.parse_expression()?;
                    self.expect(
                        TokenKind::Colon,
                        SyntaxErrorKind::MalformedCase,
                        "expected ':' after case expression",
                    )?;
                    let body = self.parse_statements_until(&clause_end, &open)?;
                    cases.push(SwitchCase {
                        test,
                        body,
                        span: self.span_from(case.span),
                    });
                }
                TokenKind::Default if default.is_some() => {
                    return Err(self.error_here(
                        SyntaxErrorKind::MalformedCase,
                        "duplicate 'default' clause in switch",
                    ));
                }
                TokenKind::Default => {
                    self.advance();
                    self.expect(
                        TokenKind::Colon,
                        SyntaxErrorKind::MalformedCase,
                        "expected ':' after 'default'",
                    )?;
                    default = Some(self.parse_statements_until(&clause_end, &open)?);
                }
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Err(self.error_here(
                        SyntaxErrorKind::UnterminatedBlock,
                        &format!("unterminated block opened at line {}", open.line),
                    ));
                }
                _ => {
                    return Err(self.error_here(
                        SyntaxErrorKind::MalformedCase,
                        "expected 'case', 'default' or '}' in switch body",
                    ));
                }
            }
        }

        Ok(SwitchStatement {
            discriminant,
            cases,
            default,
            span: self.span_from(keyword.span),
        })
    }

    /// `try { ... } catch (ID) { ... }`
    pub(crate) fn parse_try_catch(&mut self) -> ParseResult<TryCatch> {
        let keyword = self.advance();
        let try_block = self.parse_block("try")?;
        self.expect(
            TokenKind::Catch,
            SyntaxErrorKind::UnexpectedToken,
            "expected 'catch' after try block",
        )?;
        self.expect(
            TokenKind::LParen,
            SyntaxErrorKind::UnexpectedToken,
            "expected '(' after 'catch'",
        )?;
        let parameter = self.expect_identifier(
            SyntaxErrorKind::MissingIdentifier,
            "expected a catch parameter name",
        )?;
        self.expect(
            TokenKind::RParen,
            SyntaxErrorKind::UnexpectedToken,
            "expected ')' after catch parameter",
        )?;
        let catch_block = self.parse_block("catch")?;

        Ok(TryCatch {
            try_block,
            parameter,
            catch_block,
            span: self.span_from(keyword.span),
        })
    }

    /// Parenthesized condition after `if`, `while` or `switch`
    fn parse_condition(&mut self, construct: &str) -> ParseResult<Expression> {
        self.expect(
            TokenKind::LParen,
            SyntaxErrorKind::MalformedCondition,
            &format!("expected '(' after '{construct}'"),
        )?;
        if self.check(TokenKind::RParen) {
            return Err(self.error_here(
                SyntaxErrorKind::MalformedCondition,
                &format!("missing condition in '{construct}'"),
            ));
        }

        let condition = self.parse_expression()?;
        self.expect(
            TokenKind::RParen,
            SyntaxErrorKind::UnclosedCondition,
            &format!("expected ')' to close '{construct}' condition"),
        )?;
        Ok(condition)
    }
}
