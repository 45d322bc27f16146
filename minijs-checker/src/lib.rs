//! minijs scope checker
//!
//! Verifies that every variable is declared before it is used and is not
//! declared twice in the same scope. Unlike lexing and parsing, checking is
//! collect-all: `analyze` returns every violation in the program, and an empty
//! list means the program may be executed.
//!
//! ## Components
//!
//! - **Visitor**: reusable depth-first AST traversal with `walk_*` defaults
//! - **ScopeStack**: nested name tables, global scope at the bottom
//! - **ScopeChecker**: the visitor that declares and resolves names

pub mod checker;
pub mod error;
pub mod scope;
pub mod visitor;

pub use checker::ScopeChecker;
pub use error::ScopeError;
pub use scope::{Scope, ScopeStack};
pub use visitor::Visitor;

use minijs_parser::Program;

/// Check `program` with an empty global scope
pub fn analyze(program: &Program) -> Vec<ScopeError> {
    ScopeChecker::new().analyze(program)
}
