// minijs Parser Error Handling
// Fail-fast lexical and syntax errors with miette integration

use crate::ast::Span;
use crate::token::Token;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// The first character the lexer could not match
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("lexical error at line {line}, column {column}: illegal character '{character}'")]
#[diagnostic(
    code(minijs::lex::illegal_character),
    help("Remove the character or put it inside a string literal")
)]
pub struct LexicalError {
    pub character: char,
    pub line: usize,
    pub column: usize,
    #[source_code]
    pub src: String,
    #[label("illegal character")]
    pub span: SourceSpan,
}

/// Which grammar rule a syntax error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnexpectedToken,
    MissingSemicolon,
    MissingIdentifier,
    MalformedCondition,
    UnclosedCondition,
    MalformedForHeader,
    UnterminatedBlock,
    MalformedParameters,
    MalformedCase,
    NestingTooDeep,
}

/// The first token sequence the parser could not resolve.
///
/// `context` holds everything rendered after the headline: the offending
/// source line with a caret under the column, and the optional hint.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("syntactic error at line {line}, column {column}: {message} (found {found}){context}")]
#[diagnostic(code(minijs::parse::syntax_error))]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    /// Offending token as shown to the user (`'let'`, `end of input`)
    pub found: String,
    pub line: usize,
    pub column: usize,
    pub context: String,
    #[help]
    pub hint: Option<String>,
    #[source_code]
    pub src: String,
    #[label("{message}")]
    pub span: SourceSpan,
}

impl SyntaxError {
    /// Build an error positioned at `token`.
    ///
    /// `at_line_start` marks a token that opens its line; such errors usually
    /// come from a missing semicolon on the previous line.
    pub fn at_token(
        kind: SyntaxErrorKind,
        message: impl Into<String>,
        token: &Token,
        source: Option<&str>,
        at_line_start: bool,
    ) -> Self {
        let hint = (at_line_start && token.line > 1)
            .then(|| "check the previous line for a missing semicolon".to_string());
        let context = source
            .map(|src| render_context(src, token.line, token.column, hint.as_deref()))
            .unwrap_or_default();

        SyntaxError {
            kind,
            message: message.into(),
            found: token.describe(),
            line: token.line,
            column: token.column,
            context,
            hint,
            src: source.unwrap_or_default().to_string(),
            span: token.span.into(),
        }
    }
}

/// Error from the combined tokenize + parse entry points
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexical(#[from] LexicalError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lexical(err) => err.line,
            ParseError::Syntax(err) => err.line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseError::Lexical(err) => err.column,
            ParseError::Syntax(err) => err.column,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Source line(s) with a caret marking `column`
fn render_context(source: &str, line: usize, column: usize, hint: Option<&str>) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let current = lines.get(line.saturating_sub(1)).copied().unwrap_or("");
    let mut rendered = String::new();

    if hint.is_some() && line > 1 {
        let previous = lines.get(line - 2).copied().unwrap_or("");
        rendered.push_str(&format!("\n    {previous}"));
    }

    let padding: String = current
        .chars()
        .take(column.saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    rendered.push_str(&format!("\n    {current}\n    {padding}^"));

    if let Some(hint) = hint {
        rendered.push_str(&format!("\nhint: {hint}"));
    }
    rendered
}

pub(crate) fn span_for(source: &str, span: Span) -> SourceSpan {
    let end = span.end.min(source.len());
    let start = span.start.min(end);
    SourceSpan::new(start.into(), end - start)
}
