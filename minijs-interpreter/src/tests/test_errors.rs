use crate::{run_source, PipelineError, RuntimeError};
use miette::Diagnostic;
use pretty_assertions::assert_eq;

fn runtime_error(source: &str) -> RuntimeError {
    match run_source(source) {
        Err(PipelineError::Runtime(err)) => err,
        other => panic!("Expected runtime error, got {:?}", other),
    }
}

#[test]
fn test_division_by_zero_reports_position() {
    let err = runtime_error("let d = 1 / 0;");
    assert_eq!(
        err.to_string(),
        "runtime error: division by zero at line 1, column 9"
    );
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("minijs::runtime::division_by_zero".to_string())
    );
}

#[test]
fn test_arithmetic_type_errors() {
    assert_eq!(
        runtime_error("let e = \"a\" - 1;").message(),
        "cannot apply '-' to string and number"
    );
    assert_eq!(
        runtime_error("let e = [1] * 2;").message(),
        "cannot apply '*' to array and number"
    );
    assert_eq!(
        runtime_error("let e = true + 1;").message(),
        "cannot apply '+' to boolean and number"
    );
    assert_eq!(
        runtime_error("let e = -\"x\";").message(),
        "cannot apply '-' to string"
    );
}

#[test]
fn test_ordering_needs_matching_types() {
    assert_eq!(
        runtime_error("let e = 1 < \"2\";").message(),
        "cannot apply '<' to number and string"
    );
}

#[test]
fn test_undefined_function_at_runtime() {
    let err = runtime_error("let f = 1;\nfunction g() { return f(); }\ng();");
    assert_eq!(
        err.to_string(),
        "runtime error: function 'f' is not defined at line 2, column 23"
    );
}

#[test]
fn test_errors_carry_a_label() {
    let err = runtime_error("let a = [1];\na[3];");
    let labels: Vec<_> = err.labels().map(|labels| labels.collect()).unwrap_or_default();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 13);
}

/// Run `source` on a thread with a typical main-thread stack
fn run_on_main_sized_stack(source: String) -> Result<Vec<String>, String> {
    std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(move || run_source(&source).map_err(|err| err.stage().to_string()))
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn test_deeply_nested_source_is_a_syntax_error() {
    let parens = format!("let x = {}1{};", "(".repeat(400), ")".repeat(400));
    assert_eq!(run_on_main_sized_stack(parens), Err("syntactic".to_string()));

    let chain = format!("let x = 0{};", " + 1".repeat(20_000));
    assert_eq!(run_on_main_sized_stack(chain), Err("syntactic".to_string()));
}

#[test]
fn test_nesting_below_the_limit_runs() {
    let source = format!(
        "let x = {}1{};\nlet y = 0{};\nconsole.log(x, y);",
        "(".repeat(90),
        ")".repeat(90),
        " + 1".repeat(90)
    );
    assert_eq!(
        run_on_main_sized_stack(source),
        Ok(vec!["1 90".to_string()])
    );
}
