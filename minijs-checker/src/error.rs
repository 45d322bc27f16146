//! Error types for the minijs scope checker
//!
//! Following the parser's miette patterns. Scope errors carry no source text;
//! attach it when rendering (`miette::Report::with_source_code`).

use miette::{Diagnostic, SourceSpan};
use minijs_parser::{Identifier, Span};
use thiserror::Error;

/// A declare/use violation found by the scope checker
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ScopeError {
    #[error(
        "semantic error at line {line}, column {column}: variable '{name}' is already declared in this scope"
    )]
    #[diagnostic(
        code(minijs::scope::already_declared),
        help("Rename one of the declarations or assign to the existing variable")
    )]
    AlreadyDeclared {
        name: String,
        line: usize,
        column: usize,
        #[label("redeclared here")]
        span: SourceSpan,
        #[label("first declared here")]
        previous: SourceSpan,
    },

    #[error("semantic error at line {line}, column {column}: undeclared variable '{name}'")]
    #[diagnostic(
        code(minijs::scope::undeclared),
        help("Declare '{name}' with var, let or const before using it")
    )]
    Undeclared {
        name: String,
        line: usize,
        column: usize,
        #[label("not declared in any enclosing scope")]
        span: SourceSpan,
    },
}

impl ScopeError {
    pub fn already_declared(name: &Identifier, previous: Span) -> Self {
        ScopeError::AlreadyDeclared {
            name: name.name.clone(),
            line: name.span.line,
            column: name.span.column,
            span: name.span.into(),
            previous: previous.into(),
        }
    }

    pub fn undeclared(name: &Identifier) -> Self {
        ScopeError::Undeclared {
            name: name.name.clone(),
            line: name.span.line,
            column: name.span.column,
            span: name.span.into(),
        }
    }

    /// The offending variable name
    pub fn name(&self) -> &str {
        match self {
            ScopeError::AlreadyDeclared { name, .. } | ScopeError::Undeclared { name, .. } => name,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ScopeError::AlreadyDeclared { line, .. } | ScopeError::Undeclared { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ScopeError::AlreadyDeclared { column, .. } | ScopeError::Undeclared { column, .. } => {
                *column
            }
        }
    }

    pub fn is_undeclared(&self) -> bool {
        matches!(self, ScopeError::Undeclared { .. })
    }
}
