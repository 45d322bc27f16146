//! Runtime error types for the minijs interpreter.
//!
//! Every fault carries its kind plus the source position of the node that
//! raised it, when one is known. Thrown values travel as
//! [`RuntimeErrorKind::Thrown`] so `try/catch` can intercept them the same way
//! it intercepts interpreter faults.

use crate::value::Value;
use miette::{Diagnostic, LabeledSpan, SourceSpan};
use minijs_parser::Span;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("{0}")]
    Thrown(Value),

    #[error("variable '{0}' is not defined")]
    UndefinedVariable(String),

    #[error("function '{0}' is not defined")]
    UndefinedFunction(String),

    #[error("'{name}' is not a function (found {found})")]
    NotCallable { name: String, found: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("'{0}' is not an array")]
    NotAnArray(String),

    #[error("array index must be an integer, got {0}")]
    IndexNotInteger(String),

    #[error("index {index} is out of range for array of length {length}")]
    IndexOutOfRange { index: i64, length: usize },

    #[error("property '{0}' not found")]
    PropertyNotFound(String),

    #[error("method '{0}' is not supported")]
    UnsupportedMethod(String),

    #[error("cannot apply '{operator}' to {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("cannot apply '{operator}' to {operand}")]
    InvalidOperand {
        operator: String,
        operand: &'static str,
    },

    #[error("maximum call depth of {0} exceeded")]
    StackOverflow(usize),

    #[error("'break' outside of a loop")]
    BreakOutsideLoop,

    #[error("failed to write output: {0}")]
    Output(String),
}

impl RuntimeErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeErrorKind::Thrown(_) => "minijs::runtime::uncaught",
            RuntimeErrorKind::UndefinedVariable(_) => "minijs::runtime::undefined_variable",
            RuntimeErrorKind::UndefinedFunction(_) => "minijs::runtime::undefined_function",
            RuntimeErrorKind::NotCallable { .. } => "minijs::runtime::not_callable",
            RuntimeErrorKind::DivisionByZero => "minijs::runtime::division_by_zero",
            RuntimeErrorKind::NotAnArray(_) => "minijs::runtime::not_an_array",
            RuntimeErrorKind::IndexNotInteger(_) => "minijs::runtime::index_not_integer",
            RuntimeErrorKind::IndexOutOfRange { .. } => "minijs::runtime::index_out_of_range",
            RuntimeErrorKind::PropertyNotFound(_) => "minijs::runtime::property_not_found",
            RuntimeErrorKind::UnsupportedMethod(_) => "minijs::runtime::unsupported_method",
            RuntimeErrorKind::InvalidOperands { .. } | RuntimeErrorKind::InvalidOperand { .. } => {
                "minijs::runtime::type_error"
            }
            RuntimeErrorKind::StackOverflow(_) => "minijs::runtime::stack_overflow",
            RuntimeErrorKind::BreakOutsideLoop => "minijs::runtime::break_outside_loop",
            RuntimeErrorKind::Output(_) => "minijs::runtime::output",
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            RuntimeErrorKind::Thrown(_) => Some("wrap the code in 'try { ... } catch (e) { ... }'"),
            RuntimeErrorKind::UndefinedVariable(_) => {
                Some("function bodies only see their own parameters and locals")
            }
            RuntimeErrorKind::DivisionByZero => {
                Some("ensure the divisor is not zero before dividing")
            }
            RuntimeErrorKind::UnsupportedMethod(_) => Some("arrays support 'push' and 'pop'"),
            RuntimeErrorKind::StackOverflow(_) => Some("check the recursion for a base case"),
            RuntimeErrorKind::BreakOutsideLoop => {
                Some("'break' may only appear inside a loop")
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RuntimeErrorKind::Thrown(_) => "thrown here",
            RuntimeErrorKind::UndefinedVariable(_) => "undefined variable",
            RuntimeErrorKind::UndefinedFunction(_) => "undefined function",
            RuntimeErrorKind::NotCallable { .. } => "not callable",
            RuntimeErrorKind::DivisionByZero => "division by zero here",
            RuntimeErrorKind::IndexOutOfRange { .. } | RuntimeErrorKind::IndexNotInteger(_) => {
                "invalid index"
            }
            RuntimeErrorKind::StackOverflow(_) => "call nested too deeply",
            _ => "error occurred here",
        }
    }
}

/// Source position rendered after a runtime message, if known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location(Option<(usize, usize)>);

impl Location {
    pub fn line(&self) -> Option<usize> {
        self.0.map(|(line, _)| line)
    }

    pub fn column(&self) -> Option<usize> {
        self.0.map(|(_, column)| column)
    }
}

impl From<Span> for Location {
    fn from(span: Span) -> Self {
        Location(Some((span.line, span.column)))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((line, column)) => write!(f, " at line {line}, column {column}"),
            None => Ok(()),
        }
    }
}

/// Runtime errors that can occur during interpretation
#[derive(Error, Debug, Clone, PartialEq)]
#[error("runtime error: {kind}{at}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub at: Location,
    pub span: Option<SourceSpan>,
}

impl RuntimeError {
    pub fn with_span(kind: RuntimeErrorKind, span: Span) -> Self {
        Self {
            kind,
            at: span.into(),
            span: Some(span.into()),
        }
    }

    pub fn thrown(value: Value, span: Span) -> Self {
        Self::with_span(RuntimeErrorKind::Thrown(value), span)
    }

    pub fn undefined_variable(name: &str, span: Span) -> Self {
        Self::with_span(RuntimeErrorKind::UndefinedVariable(name.to_string()), span)
    }

    pub fn undefined_function(name: &str, span: Span) -> Self {
        Self::with_span(RuntimeErrorKind::UndefinedFunction(name.to_string()), span)
    }

    pub fn not_callable(name: &str, found: &Value, span: Span) -> Self {
        Self::with_span(
            RuntimeErrorKind::NotCallable {
                name: name.to_string(),
                found: found.type_name(),
            },
            span,
        )
    }

    pub fn invalid_operands(operator: &str, left: &Value, right: &Value, span: Span) -> Self {
        Self::with_span(
            RuntimeErrorKind::InvalidOperands {
                operator: operator.to_string(),
                left: left.type_name(),
                right: right.type_name(),
            },
            span,
        )
    }

    pub fn invalid_operand(operator: &str, operand: &Value, span: Span) -> Self {
        Self::with_span(
            RuntimeErrorKind::InvalidOperand {
                operator: operator.to_string(),
                operand: operand.type_name(),
            },
            span,
        )
    }

    /// The text a `catch` parameter receives: no tier prefix, no position
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// `break` escaping its function is a structural fault `try` cannot absorb
    pub fn is_catchable(&self) -> bool {
        !matches!(self.kind, RuntimeErrorKind::BreakOutsideLoop)
    }

    pub fn line(&self) -> Option<usize> {
        self.at.line()
    }

    pub fn column(&self) -> Option<usize> {
        self.at.column()
    }
}

impl Diagnostic for RuntimeError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind
            .help()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.span.map(|span| {
            Box::new(std::iter::once(LabeledSpan::new_with_span(
                Some(self.kind.label().to_string()),
                span,
            ))) as Box<dyn Iterator<Item = LabeledSpan>>
        })
    }
}
