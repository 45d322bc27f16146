// minijs Parser Library
// Pest-backed lexer and recursive-descent parser for the minijs language

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use error::*;
pub use lexer::{tokenize, tokenize_with, Lexer, LexerConfig};
pub use parser::{Parser, MAX_NESTING_DEPTH};
pub use token::{Literal, Token, TokenKind};

/// Parse a token stream without source context in diagnostics
pub fn parse(tokens: &[Token]) -> Result<Program, SyntaxError> {
    Parser::new(tokens, None).parse_program()
}

/// Parse a token stream, quoting `source` in diagnostics
pub fn parse_with_source(tokens: &[Token], source: &str) -> Result<Program, SyntaxError> {
    Parser::new(tokens, Some(source)).parse_program()
}

/// Tokenize and parse `source` in one step
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    Ok(parse_with_source(&tokens, source)?)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests;
