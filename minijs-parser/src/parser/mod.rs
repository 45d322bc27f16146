// minijs Parser
// Recursive-descent parser over the token stream, split by construct family

mod collections;
mod control_flow;
mod expressions;
mod functions;

use crate::ast::*;
use crate::error::{ParseResult, SyntaxError, SyntaxErrorKind};
use crate::token::{Token, TokenKind};
use log::{debug, trace};

/// Deepest nesting of statements and expressions the parser accepts.
///
/// Checking and evaluation recurse over the tree, so this also bounds their
/// stack use. Each link of a binary operator chain counts as a level because
/// the chain builds a left-leaning spine.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Builds a `Program` from tokens, stopping at the first syntax error.
///
/// Comment tokens never reach the grammar; they are set aside into
/// `Program::comments` when the parser is created.
pub struct Parser<'src> {
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    position: usize,
    source: Option<&'src str>,
    depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(tokens: &[Token], source: Option<&'src str>) -> Self {
        let mut comments = Vec::new();
        let mut stream = Vec::with_capacity(tokens.len() + 1);

        for token in tokens {
            match token.kind {
                TokenKind::Comment => comments.push(Comment {
                    text: token.text().unwrap_or_default().to_string(),
                    span: token.span,
                }),
                _ => stream.push(token.clone()),
            }
        }

        if !stream.last().is_some_and(|token| token.is(TokenKind::Eof)) {
            let end = match stream.last() {
                Some(token) => Span::new(
                    token.span.end,
                    token.span.end,
                    token.line,
                    token.column + token.lexeme.chars().count(),
                ),
                None => Span::new(0, 0, 1, 1),
            };
            stream.push(Token::eof(end));
        }

        Self {
            tokens: stream,
            comments,
            position: 0,
            source,
            depth: 0,
        }
    }

    /// Parse the whole token stream
    pub fn parse_program(mut self) -> ParseResult<Program> {
        debug!(target: "minijs::parser", "parsing {} tokens", self.tokens.len());
        let start = self.peek().span;
        let mut statements = Vec::new();

        while !self.check(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }

        let span = Span::new(0, self.peek().span.end, 1, 1);
        debug!(
            target: "minijs::parser",
            "parsed {} top-level statements starting at {}:{}",
            statements.len(),
            start.line,
            start.column
        );
        Ok(Program {
            statements,
            comments: self.comments,
            span,
        })
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.descend()?;
        let statement = self.parse_any_statement();
        self.ascend(1);
        statement
    }

    fn parse_any_statement(&mut self) -> ParseResult<Statement> {
        let token = self.peek().clone();
        trace!(target: "minijs::parser", "statement at {}:{} ({})", token.line, token.column, token);

        match token.kind {
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let declaration = self.parse_declaration()?;
                self.expect_semicolon("declaration")?;
                Ok(self.statement(StatementKind::Declaration(declaration), token.span))
            }
            TokenKind::Function if self.peek_nth(1).is(TokenKind::Identifier) => {
                let function = self.parse_function_declaration()?;
                Ok(self.statement(StatementKind::FunctionDeclaration(function), token.span))
            }
            TokenKind::If => {
                let if_stmt = self.parse_if_statement()?;
                Ok(self.statement(StatementKind::If(if_stmt), token.span))
            }
            TokenKind::While => {
                let while_stmt = self.parse_while_statement()?;
                Ok(self.statement(StatementKind::While(while_stmt), token.span))
            }
            TokenKind::For => {
                let for_stmt = self.parse_for_statement()?;
                Ok(self.statement(StatementKind::For(for_stmt), token.span))
            }
            TokenKind::Switch => {
                let switch = self.parse_switch_statement()?;
                Ok(self.statement(StatementKind::Switch(switch), token.span))
            }
            TokenKind::Try => {
                let try_catch = self.parse_try_catch()?;
                Ok(self.statement(StatementKind::TryCatch(try_catch), token.span))
            }
            TokenKind::Throw => {
                self.advance();
                let value = self.parse_expression()?;
                self.expect_semicolon("'throw' statement")?;
                Ok(self.statement(StatementKind::Throw(value), token.span))
            }
            TokenKind::Break => {
                self.advance();
                self.expect_semicolon("'break'")?;
                Ok(self.statement(StatementKind::Break, token.span))
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.check(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.expect_semicolon("'return' statement")?;
                Ok(self.statement(StatementKind::Return(value), token.span))
            }
            TokenKind::Identifier if self.peek_nth(1).is(TokenKind::Assign) => {
                let assignment = self.parse_assignment()?;
                self.expect_semicolon("assignment")?;
                Ok(self.statement(StatementKind::Assignment(assignment), token.span))
            }
            TokenKind::RBrace
            | TokenKind::Else
            | TokenKind::Case
            | TokenKind::Default
            | TokenKind::Catch => Err(self.error_here(
                SyntaxErrorKind::UnexpectedToken,
                "unexpected token at start of statement",
            )),
            _ => {
                let expression = self.parse_expression()?;
                self.expect_semicolon("expression")?;
                Ok(self.statement(StatementKind::Expression(expression), token.span))
            }
        }
    }

    /// `var|let|const ID [= expr]`, without the terminator
    pub(crate) fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let keyword = self.advance();
        let kind = match keyword.kind {
            TokenKind::Var => DeclarationKind::Var,
            TokenKind::Let => DeclarationKind::Let,
            _ => DeclarationKind::Const,
        };

        let name = self.expect_identifier(
            SyntaxErrorKind::MissingIdentifier,
            &format!("expected a variable name after '{kind}'"),
        )?;

        let initializer = match self.eat(TokenKind::Assign) {
            Some(_) => Some(self.parse_expression()?),
            None => None,
        };

        Ok(Declaration {
            kind,
            name,
            initializer,
            span: self.span_from(keyword.span),
        })
    }

    /// `ID = expr`, without the terminator
    pub(crate) fn parse_assignment(&mut self) -> ParseResult<Assignment> {
        let target = self.expect_identifier(
            SyntaxErrorKind::MissingIdentifier,
            "expected an assignment target",
        )?;
        self.expect(
            TokenKind::Assign,
            SyntaxErrorKind::UnexpectedToken,
            "expected '=' in assignment",
        )?;
        let value = self.parse_expression()?;

        Ok(Assignment {
            span: target.span.to(&value.span),
            target,
            value,
        })
    }

    /// `{ statements }`; `construct` names the owner in error messages
    pub(crate) fn parse_block(&mut self, construct: &str) -> ParseResult<Block> {
        let open = self.expect(
            TokenKind::LBrace,
            SyntaxErrorKind::UnexpectedToken,
            &format!("expected '{{' to open {construct} body"),
        )?;
        let statements = self.parse_statements_until(&[TokenKind::RBrace], &open)?;
        self.advance();

        Ok(Block {
            statements,
            span: self.span_from(open.span),
        })
    }

    /// Statements up to (not including) one of `terminators`.
    ///
    /// Reaching the end of input first is an unterminated block reported
    /// against the line of `open`.
    pub(crate) fn parse_statements_until(
        &mut self,
        terminators: &[TokenKind],
        open: &Token,
    ) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            let kind = self.peek().kind;
            if terminators.contains(&kind) {
                return Ok(statements);
            }
            if kind == TokenKind::Eof {
                return Err(self.error_here(
                    SyntaxErrorKind::UnterminatedBlock,
                    &format!("unterminated block opened at line {}", open.line),
                ));
            }
            statements.push(self.parse_statement()?);
        }
    }

    fn statement(&self, kind: StatementKind, start: Span) -> Statement {
        Statement {
            kind,
            span: self.span_from(start),
        }
    }

    // Token cursor

    pub(crate) fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Token `n` positions ahead, clamped to the end-of-input marker
    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        self.check(kind).then(|| self.advance())
    }

    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        error: SyntaxErrorKind,
        message: &str,
    ) -> ParseResult<Token> {
        self.eat(kind).ok_or_else(|| self.error_here(error, message))
    }

    pub(crate) fn expect_identifier(
        &mut self,
        error: SyntaxErrorKind,
        message: &str,
    ) -> ParseResult<Identifier> {
        let token = self.expect(TokenKind::Identifier, error, message)?;
        Ok(Identifier {
            name: token.lexeme,
            span: token.span,
        })
    }

    fn expect_semicolon(&mut self, after: &str) -> ParseResult<Token> {
        self.expect(
            TokenKind::Semicolon,
            SyntaxErrorKind::MissingSemicolon,
            &format!("missing ';' after {after}"),
        )
    }

    /// Span of the most recently consumed token
    pub(crate) fn previous_span(&self) -> Span {
        match self.position {
            0 => self.peek().span,
            n => self.tokens[n - 1].span,
        }
    }

    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.to(&self.previous_span())
    }

    /// Whether the current token is the first one on its line
    fn at_line_start(&self) -> bool {
        self.position > 0 && self.tokens[self.position - 1].line < self.peek().line
    }

    /// Enter one nesting level, failing past [`MAX_NESTING_DEPTH`]
    pub(crate) fn descend(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(SyntaxError::at_token(
                SyntaxErrorKind::NestingTooDeep,
                format!("nesting deeper than {MAX_NESTING_DEPTH} levels"),
                self.peek(),
                self.source,
                false,
            ));
        }
        Ok(())
    }

    pub(crate) fn ascend(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    pub(crate) fn error_here(&self, kind: SyntaxErrorKind, message: &str) -> SyntaxError {
        SyntaxError::at_token(kind, message, self.peek(), self.source, self.at_line_start())
    }
}
