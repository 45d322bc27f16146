//! Interactive session for minijs.
//!
//! Each entry runs through the full pipeline against a persistent
//! [`InterpreterSession`], so declarations and functions from earlier entries
//! stay visible. Lines starting with `:` are REPL commands. Input with
//! unbalanced brackets or an open string continues on the next line.

use crate::report::{self, SourceFile};
use crate::sexpr::format_program_as_sexpr;
use log::{debug, warn};
use miette::Diagnostic;
use minijs_interpreter::{InterpreterSession, Value};
use rustyline::{error::ReadlineError, DefaultEditor};
use thiserror::Error;

const SOURCE_NAME: &str = "<repl>";

/// Errors that end the REPL or reject a command
#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error("IO error: {source}")]
    #[diagnostic(code(minijs::repl::io))]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Readline error: {source}")]
    #[diagnostic(code(minijs::repl::readline))]
    Readline {
        #[from]
        source: ReadlineError,
    },

    #[error("REPL command error: {message}")]
    #[diagnostic(code(minijs::repl::command), help("type :help to list the commands"))]
    Command { message: String },
}

/// REPL configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    pub prompt: String,

    /// History file path
    pub history_file: Option<String>,

    /// Load the history file on start and write it on exit
    pub persist_history: bool,

    /// Print the token stream of every entry before running it
    pub show_tokens: bool,

    /// Print the AST of every entry before running it
    pub show_ast: bool,

    /// Render failures as graphical miette reports
    pub fancy_errors: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "minijs> ".to_string(),
            history_file: Some(".minijs_history".to_string()),
            persist_history: true,
            show_tokens: false,
            show_ast: false,
            fancy_errors: false,
        }
    }
}

/// Result of evaluating one entry
#[derive(Debug)]
pub enum ReplResult {
    /// Completion value of the entry's final expression
    Value(Value),

    /// Output of a REPL command
    Command { message: String },

    /// Rendered diagnostics from the tier that rejected the entry
    Failed { diagnostics: Vec<String> },

    /// Nothing to show
    Empty,

    /// Exit request
    Exit,
}

/// REPL session that maintains state across entries
pub struct ReplSession {
    editor: DefaultEditor,
    session: InterpreterSession,
    config: ReplConfig,
}

impl ReplSession {
    /// A session whose `console.log` output goes to stdout
    pub fn new(config: ReplConfig) -> Result<Self, ReplError> {
        Self::with_session(config, InterpreterSession::new())
    }

    pub fn with_session(config: ReplConfig, session: InterpreterSession) -> Result<Self, ReplError> {
        let mut editor = DefaultEditor::new()?;

        if config.persist_history {
            if let Some(ref history_file) = config.history_file {
                if let Err(err) = editor.load_history(history_file) {
                    debug!("no history loaded from {history_file}: {err}");
                }
            }
        }

        Ok(Self {
            editor,
            session,
            config,
        })
    }

    /// Start the REPL main loop
    pub fn run(&mut self) -> Result<(), ReplError> {
        println!("minijs REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for commands, :quit to exit");
        println!();

        while let Some(input) = self.read_input()? {
            match self.evaluate_line(&input) {
                Ok(ReplResult::Exit) => break,
                Ok(result) => display_result(result),
                Err(err) => eprintln!("{:?}", miette::Report::new(err)),
            }
        }

        self.save_history()
    }

    /// Read one entry, continuing over lines until it is balanced
    fn read_input(&mut self) -> Result<Option<String>, ReplError> {
        let mut input = String::new();

        loop {
            let prompt = if input.is_empty() {
                self.config.prompt.as_str()
            } else {
                "... "
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    if input.is_empty() && line.trim().is_empty() {
                        return Ok(Some(String::new()));
                    }
                    if !input.is_empty() {
                        input.push('\n');
                    }
                    input.push_str(&line);

                    if is_input_complete(&input) {
                        self.editor.add_history_entry(input.as_str())?;
                        return Ok(Some(input));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C drops a half-typed entry
                    println!("^C");
                    return Ok(Some(String::new()));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Evaluate an entry or run a command
    pub fn evaluate_line(&mut self, line: &str) -> Result<ReplResult, ReplError> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Ok(ReplResult::Empty);
        }
        if let Some(command) = trimmed.strip_prefix(':') {
            return self.execute_command(command);
        }

        if self.config.show_tokens {
            if let Ok(message) = self.format_tokens(trimmed) {
                println!("{message}");
            }
        }
        if self.config.show_ast {
            if let Ok(message) = self.format_ast(trimmed) {
                println!("{message}");
            }
        }

        match self.session.evaluate(trimmed) {
            Ok(Value::Undefined) => Ok(ReplResult::Empty),
            Ok(value) => Ok(ReplResult::Value(value)),
            Err(err) => {
                debug!("{} stage rejected the entry", err.stage());
                Ok(ReplResult::Failed {
                    diagnostics: self.render(err, trimmed),
                })
            }
        }
    }

    fn execute_command(&mut self, command: &str) -> Result<ReplResult, ReplError> {
        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (command, ""),
        };

        let message = match (name, argument) {
            ("help" | "h", _) => help_message(),
            ("quit" | "q" | "exit", _) => return Ok(ReplResult::Exit),
            ("vars", _) => self.format_variables(),
            ("reset", _) => {
                self.session.reset();
                "Variables and functions cleared".to_string()
            }
            ("tokens", "") => {
                self.config.show_tokens = !self.config.show_tokens;
                format!("Token display {}", on_off(self.config.show_tokens))
            }
            ("tokens", source) => match self.format_tokens(source) {
                Ok(message) => message,
                Err(diagnostics) => return Ok(ReplResult::Failed { diagnostics }),
            },
            ("ast", "") => {
                self.config.show_ast = !self.config.show_ast;
                format!("AST display {}", on_off(self.config.show_ast))
            }
            ("ast", source) => match self.format_ast(source) {
                Ok(message) => message,
                Err(diagnostics) => return Ok(ReplResult::Failed { diagnostics }),
            },
            _ => {
                return Err(ReplError::Command {
                    message: format!("Unknown command ':{name}'"),
                })
            }
        };

        Ok(ReplResult::Command { message })
    }

    fn format_tokens(&self, source: &str) -> Result<String, Vec<String>> {
        let tokens = self
            .session
            .tokenize(source)
            .map_err(|err| self.render(err, source))?;
        let lines: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        Ok(lines.join(" "))
    }

    fn format_ast(&self, source: &str) -> Result<String, Vec<String>> {
        let program = self
            .session
            .parse(source)
            .map_err(|err| self.render(err, source))?;
        Ok(format_program_as_sexpr(&program))
    }

    fn format_variables(&self) -> String {
        let variables = self.session.variables();
        let functions = self.session.function_names();

        if variables.is_empty() && functions.is_empty() {
            return "No variables defined".to_string();
        }

        let mut lines = Vec::new();
        if !variables.is_empty() {
            lines.push("Variables:".to_string());
            for (name, value) in variables {
                lines.push(format!("  {name} = {value}"));
            }
        }
        if !functions.is_empty() {
            lines.push("Functions:".to_string());
            for name in functions {
                lines.push(format!("  {name}"));
            }
        }
        lines.join("\n")
    }

    fn render(&self, err: minijs_interpreter::PipelineError, source: &str) -> Vec<String> {
        report::render(
            err,
            &SourceFile::new(SOURCE_NAME, source),
            self.config.fancy_errors,
        )
    }

    fn save_history(&mut self) -> Result<(), ReplError> {
        if self.config.persist_history {
            if let Some(ref history_file) = self.config.history_file {
                if let Err(err) = self.editor.save_history(history_file) {
                    warn!("could not save history to {history_file}: {err}");
                }
            }
        }
        Ok(())
    }
}

fn display_result(result: ReplResult) {
    match result {
        ReplResult::Value(value) => println!("{value}"),
        ReplResult::Command { message } => println!("{message}"),
        ReplResult::Failed { diagnostics } => {
            for block in diagnostics {
                eprintln!("{block}");
            }
        }
        ReplResult::Empty | ReplResult::Exit => {}
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Whether brackets are balanced and no string is left open
fn is_input_complete(input: &str) -> bool {
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                // The lexer rejects a newline inside a string, so let it through
                '\n' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth -= 1,
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    depth <= 0 && !in_string
}

fn help_message() -> String {
    r#"minijs REPL commands:
  :help, :h           Show this help message
  :vars               List variables and functions
  :reset              Forget every variable and function
  :tokens [SOURCE]    Show the tokens of SOURCE, or toggle token display
  :ast [SOURCE]       Show the AST of SOURCE, or toggle AST display
  :quit, :q, :exit    Exit the REPL

Examples:
  let x = 1 + 2;              Declare a variable
  x * 2                       Show a value
  function inc(n) {           Multi-line input continues
    return n + 1;             until the braces balance
  }

Use Ctrl+C to drop the current entry, Ctrl+D to exit."#
        .to_string()
}
