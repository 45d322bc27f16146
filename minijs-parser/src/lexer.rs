// minijs Lexer
// Drives the pest token grammar one lexeme at a time and attaches positions

use crate::ast::Span;
use crate::error::{span_for, LexicalError};
use crate::token::{Literal, Token, TokenKind};
use log::{debug, trace};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "lexer.pest"]
pub struct LexemeGrammar;

/// Lexer options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerConfig {
    /// Emit `//` comments as `Comment` tokens instead of dropping them
    pub emit_comments: bool,
}

impl LexerConfig {
    pub fn with_comments() -> Self {
        Self {
            emit_comments: true,
        }
    }
}

/// Tokenize `source`, dropping comments
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(source, LexerConfig::default()).tokenize()
}

/// Tokenize `source` with explicit options
pub fn tokenize_with(source: &str, config: LexerConfig) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(source, config).tokenize()
}

pub struct Lexer<'src> {
    source: &'src str,
    config: LexerConfig,
    offset: usize,
    line: usize,
    /// 1-based column of `offset`, in characters
    column: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, config: LexerConfig) -> Self {
        Self {
            source,
            config,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexicalError> {
        debug!(target: "minijs::lexer", "tokenizing {} bytes", self.source.len());
        let mut tokens = Vec::new();

        while self.offset < self.source.len() {
            let rest = &self.source[self.offset..];
            let (rule, text) = next_lexeme(rest).ok_or_else(|| self.illegal_character())?;
            let span = self.span_of(text);
            trace!(target: "minijs::lexer", "{:?} {:?} at {}:{}", rule, text, span.line, span.column);

            match rule {
                Rule::newline => {
                    self.offset += text.len();
                    self.line += 1;
                    self.column = 1;
                    continue;
                }
                Rule::blank => {}
                Rule::comment => {
                    if self.config.emit_comments {
                        let body = text[2..].trim().to_string();
                        tokens.push(Token::new(TokenKind::Comment, Literal::Text(body), text, span));
                    }
                }
                Rule::number => {
                    let value: f64 = text.parse().map_err(|_| self.illegal_character())?;
                    tokens.push(Token::new(TokenKind::Number, Literal::Number(value), text, span));
                }
                Rule::string => {
                    let contents = text[1..text.len() - 1].to_string();
                    tokens.push(Token::new(TokenKind::String, Literal::Text(contents), text, span));
                }
                Rule::identifier => {
                    let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
                    tokens.push(Token::new(kind, Literal::Text(text.to_string()), text, span));
                }
                Rule::punctuation => {
                    let kind = TokenKind::punctuation(text).ok_or_else(|| self.illegal_character())?;
                    tokens.push(Token::new(kind, Literal::None, text, span));
                }
                _ => return Err(self.illegal_character()),
            }

            self.offset += text.len();
            self.column += text.chars().count();
        }

        let end = self.source.len();
        tokens.push(Token::eof(Span::new(end, end, self.line, self.column)));
        debug!(target: "minijs::lexer", "produced {} tokens", tokens.len());
        Ok(tokens)
    }

    fn span_of(&self, text: &str) -> Span {
        Span::new(
            self.offset,
            self.offset + text.len(),
            self.line,
            self.column,
        )
    }

    fn illegal_character(&self) -> LexicalError {
        let character = self.source[self.offset..].chars().next().unwrap_or('\0');
        let span = Span::new(
            self.offset,
            self.offset + character.len_utf8(),
            self.line,
            self.column,
        );
        LexicalError {
            character,
            line: span.line,
            column: span.column,
            src: self.source.to_string(),
            span: span_for(self.source, span),
        }
    }
}

/// Match a single lexeme at the start of `input`
fn next_lexeme(input: &str) -> Option<(Rule, &str)> {
    let mut pairs = LexemeGrammar::parse(Rule::lexeme, input).ok()?;
    let pair = pairs.next()?;
    let text = pair.as_str();
    if text.is_empty() {
        return None;
    }
    Some((pair.as_rule(), text))
}
