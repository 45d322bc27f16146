//! Interpreter session for the minijs pipeline
//!
//! A session runs source text through tokenize → parse → analyze → execute and
//! stops at the first tier that fails. Bindings, named functions and the
//! checker's global names persist between evaluations, which is what the REPL
//! needs: a name declared on one line is visible on the next.

use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, InterpreterConfig};
use crate::value::Value;
use log::debug;
use miette::Diagnostic;
use minijs_checker::{ScopeChecker, ScopeError};
use minijs_parser::{parse_with_source, tokenize, LexicalError, Program, SyntaxError, Token};
use thiserror::Error;

/// The first pipeline tier that rejected the source
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexical(#[from] LexicalError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("{}", join_lines(.errors))]
    #[diagnostic(
        code(minijs::scope::rejected),
        help("the program was not executed")
    )]
    Semantic {
        #[related]
        errors: Vec<ScopeError>,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),
}

fn join_lines(errors: &[ScopeError]) -> String {
    errors
        .iter()
        .map(ScopeError::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Lexical(_) => "lexical",
            PipelineError::Syntax(_) => "syntactic",
            PipelineError::Semantic { .. } => "semantic",
            PipelineError::Runtime(_) => "runtime",
        }
    }

    /// One rendered diagnostic per entry; only the semantic tier has several
    pub fn messages(&self) -> Vec<String> {
        match self {
            PipelineError::Semantic { errors } => errors.iter().map(ScopeError::to_string).collect(),
            other => vec![other.to_string()],
        }
    }

    pub fn runtime(&self) -> Option<&RuntimeError> {
        match self {
            PipelineError::Runtime(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors from the session's assertion helpers
#[derive(Debug, Error, Diagnostic)]
pub enum SessionError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("assertion failed: expected {expected}, but got {actual}")]
    AssertionFailed { expected: String, actual: String },
}

/// Interpreter session holding state across evaluations
#[derive(Debug)]
pub struct InterpreterSession {
    interpreter: Interpreter,
    checker: ScopeChecker,
}

impl Default for InterpreterSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterSession {
    /// A session whose console output goes to stdout
    pub fn new() -> Self {
        Self::with_interpreter(Interpreter::new())
    }

    /// A session that only records console output
    pub fn captured() -> Self {
        Self::with_interpreter(Interpreter::captured())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Self::with_interpreter(Interpreter::with_config(config))
    }

    pub fn with_interpreter(interpreter: Interpreter) -> Self {
        Self {
            interpreter,
            checker: ScopeChecker::new(),
        }
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, PipelineError> {
        Ok(tokenize(source)?)
    }

    pub fn parse(&self, source: &str) -> Result<Program, PipelineError> {
        let tokens = self.tokenize(source)?;
        Ok(parse_with_source(&tokens, source)?)
    }

    /// Scope-check `program` against the names this session already knows
    /// without committing its declarations.
    pub fn check(&self, program: &Program) -> Result<ScopeChecker, PipelineError> {
        let mut checker = self.checker.clone();
        let errors = checker.analyze(program);
        if errors.is_empty() {
            Ok(checker)
        } else {
            Err(PipelineError::Semantic { errors })
        }
    }

    /// Run `source` through the whole pipeline, returning the value of its
    /// final expression statement
    pub fn evaluate(&mut self, source: &str) -> Result<Value, PipelineError> {
        let program = self.parse(source)?;
        self.checker = self.check(&program)?;
        debug!("source accepted, executing");
        Ok(self.interpreter.run(&program)?)
    }

    /// Lines printed by `console.log` so far
    pub fn output(&self) -> &[String] {
        self.interpreter.output()
    }

    pub fn take_output(&mut self) -> Vec<String> {
        self.interpreter.take_output()
    }

    /// Current global bindings, in definition order
    pub fn variables(&self) -> Vec<(String, Value)> {
        self.interpreter
            .environment()
            .variables()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    pub fn function_names(&self) -> Vec<String> {
        self.interpreter
            .environment()
            .function_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Forget every binding, function and checker global
    pub fn reset(&mut self) {
        self.interpreter.reset();
        self.checker = ScopeChecker::new();
    }

    /// Evaluate `source` and assert on the console lines it printed
    pub fn assert_prints(&mut self, source: &str, expected: &[&str]) -> Result<(), SessionError> {
        let before = self.output().len();
        self.evaluate(source)?;
        let printed = &self.output()[before..];

        if printed == expected {
            Ok(())
        } else {
            Err(SessionError::AssertionFailed {
                expected: format!("{expected:?}"),
                actual: format!("{printed:?}"),
            })
        }
    }

    /// Evaluate `source` and assert on the value of its final expression
    pub fn assert_evaluates_to(&mut self, source: &str, expected: Value) -> Result<(), SessionError> {
        let result = self.evaluate(source)?;

        if result == expected {
            Ok(())
        } else {
            Err(SessionError::AssertionFailed {
                expected: expected.to_string(),
                actual: result.to_string(),
            })
        }
    }
}

/// Run `source` once in a fresh session, returning the printed lines
pub fn run_source(source: &str) -> Result<Vec<String>, PipelineError> {
    let mut session = InterpreterSession::captured();
    session.evaluate(source)?;
    Ok(session.take_output())
}
