//! Rendering of pipeline failures for the terminal.
//!
//! Plain mode prints the one-line workbench diagnostics. Fancy mode builds
//! miette reports with the source attached so the installed handler can draw
//! labels and highlight the offending code.

use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report};
use minijs_interpreter::{PipelineError, RuntimeError};

/// Source text together with the name diagnostics should show for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    fn named(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.text.clone()).with_language("JavaScript")
    }
}

/// One rendered block per diagnostic
pub fn render(error: PipelineError, source: &SourceFile, fancy: bool) -> Vec<String> {
    if !fancy {
        return error.messages();
    }

    match error {
        PipelineError::Lexical(err) => vec![draw(Report::new(err), source)],
        PipelineError::Syntax(err) => vec![draw(Report::new(err), source)],
        PipelineError::Semantic { errors } => errors
            .into_iter()
            .map(|err| draw(Report::new(err), source))
            .collect(),
        PipelineError::Runtime(err) => vec![draw(runtime_report(&err), source)],
    }
}

fn draw(report: Report, source: &SourceFile) -> String {
    format!("{:?}", report.with_source_code(source.named()))
}

// Thrown values hold `Rc`s, so runtime errors are copied into a plain
// diagnostic before they can become a `Report`.
fn runtime_report(err: &RuntimeError) -> Report {
    let mut diagnostic = MietteDiagnostic::new(err.to_string()).with_code(err.kind.code());
    if let Some(help) = err.kind.help() {
        diagnostic = diagnostic.with_help(help);
    }
    if let Some(span) = err.span {
        diagnostic = diagnostic.with_label(LabeledSpan::at(span, err.kind.label()));
    }
    Report::new(diagnostic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijs_interpreter::InterpreterSession;
    use pretty_assertions::assert_eq;

    fn failure(source: &str) -> PipelineError {
        InterpreterSession::captured()
            .evaluate(source)
            .expect_err("source should be rejected")
    }

    #[test]
    fn test_plain_rendering_uses_workbench_messages() {
        let source = SourceFile::new("<test>", "let x = 1;\nlet x = 2;\ny;");
        let lines = render(failure(&source.text), &source, false);
        assert_eq!(
            lines,
            vec![
                "semantic error at line 2, column 5: variable 'x' is already declared in this scope"
                    .to_string(),
                "semantic error at line 3, column 1: undeclared variable 'y'".to_string(),
            ]
        );
    }

    #[test]
    fn test_fancy_rendering_names_the_source() {
        let source = SourceFile::new("boom.js", "throw \"boom\";");
        let lines = render(failure(&source.text), &source, true);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("boom.js"), "{}", lines[0]);
        assert!(lines[0].contains("minijs::runtime::uncaught"), "{}", lines[0]);
    }

    #[test]
    fn test_fancy_rendering_draws_every_scope_error() {
        let source = SourceFile::new("scope.js", "a;\nb;");
        let lines = render(failure(&source.text), &source, true);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("undeclared variable 'b'"), "{}", lines[1]);
    }
}
