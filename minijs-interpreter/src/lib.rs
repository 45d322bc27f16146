//! minijs interpreter
//!
//! Executes checked programs by walking the AST. Values are dynamically
//! typed; arrays and objects are shared mutable containers.
//!
//! Scoping at run time is flat: the program and every function call get a
//! single name table each. A function body sees its own parameters and locals
//! plus every named function, but none of its caller's variables.
//!
//! ```text
//! source ── tokenize ──► tokens ── parse ──► Program ── analyze ──► execute
//! ```
//!
//! [`InterpreterSession`] drives the whole pipeline and keeps state between
//! evaluations.

pub mod environment;
pub mod error;
pub mod interpreter;
pub mod session;
pub mod value;

#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;

pub use environment::Environment;
pub use error::{Location, RuntimeError, RuntimeErrorKind};
pub use interpreter::{apply_binary, Flow, Interpreter, InterpreterConfig};
pub use session::{run_source, InterpreterSession, PipelineError, SessionError};
pub use value::{format_number, Callable, CallableBody, Value};
